use chrono::{NaiveDate, Utc};
use tracing::{debug, error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::CustomerClient;
use crate::domain::{DeliverySchedule, NewSchedule, ScheduleCreate};
use crate::schedule_actor::{ScheduleAction, ScheduleError};

/// Client for interacting with the Schedule actor.
#[derive(Clone)]
pub struct ScheduleClient {
    inner: ResourceClient<DeliverySchedule>,
    customer_client: CustomerClient,
}

impl ScheduleClient {
    pub fn new(inner: ResourceClient<DeliverySchedule>, customer_client: CustomerClient) -> Self {
        Self {
            inner,
            customer_client,
        }
    }

    /// Creates a recurring delivery for an existing customer.
    #[instrument(skip(self, schedule), fields(customer_id = %schedule.customer_id))]
    pub async fn create_schedule(&self, schedule: NewSchedule) -> Result<DeliverySchedule, ScheduleError> {
        match self.customer_client.get_customer(schedule.customer_id.clone()).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                error!("Customer not found");
                return Err(ScheduleError::InvalidCustomer(schedule.customer_id));
            }
            Err(e) => {
                error!(error = %e, "Customer validation failed");
                return Err(ScheduleError::ActorCommunicationError(e.to_string()));
            }
        }

        let payload = ScheduleCreate {
            customer_id: schedule.customer_id,
            quantity: schedule.quantity,
            payment_method: schedule.payment_method,
            frequency: schedule.frequency,
            slot: schedule.slot,
            created_at: Utc::now(),
        };
        let created = self.inner.create(payload).await?;
        info!(schedule_id = %created.id, "Schedule created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn pause_schedule(&self, id: String) -> Result<DeliverySchedule, ScheduleError> {
        debug!("Sending request");
        self.inner.perform_action(id, ScheduleAction::Pause).await
    }

    #[instrument(skip(self))]
    pub async fn resume_schedule(&self, id: String) -> Result<DeliverySchedule, ScheduleError> {
        debug!("Sending request");
        self.inner.perform_action(id, ScheduleAction::Resume).await
    }

    /// Marks `date` as placed for this schedule. Fails with `Conflict` if the
    /// schedule is not due on that date, including when it was already claimed.
    #[instrument(skip(self))]
    pub async fn claim_date(&self, id: String, date: NaiveDate) -> Result<DeliverySchedule, ScheduleError> {
        debug!("Sending request");
        self.inner.perform_action(id, ScheduleAction::ClaimDate(date)).await
    }

    /// Gives `date` back after its order could not be placed, restoring
    /// `previous` as the last placed date.
    #[instrument(skip(self))]
    pub async fn release_claim(
        &self,
        id: String,
        date: NaiveDate,
        previous: Option<NaiveDate>,
    ) -> Result<DeliverySchedule, ScheduleError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, ScheduleAction::ReleaseClaim { date, previous })
            .await
    }

    pub async fn list_for_customer(&self, customer_id: &str) -> Result<Vec<DeliverySchedule>, ScheduleError> {
        let schedules = self.inner.list().await?;
        Ok(schedules
            .into_iter()
            .filter(|s| s.customer_id == customer_id)
            .collect())
    }

    pub async fn due_on(&self, date: NaiveDate) -> Result<Vec<DeliverySchedule>, ScheduleError> {
        let schedules = self.inner.list().await?;
        Ok(schedules.into_iter().filter(|s| s.is_due_on(date)).collect())
    }
}

impl_client_methods!(ScheduleClient, DeliverySchedule, ScheduleError, schedule);
