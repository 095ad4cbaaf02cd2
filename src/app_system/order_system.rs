use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::{ResourceActor, DEFAULT_REQUEST_TIMEOUT};
use crate::app_system::{place_due_orders, run_materializer, SystemError};
use crate::clients::{CustomerClient, OrderClient, ScheduleClient};
use crate::config::Config;
use crate::domain::{Customer, DeliverySchedule, Order, Pricing};
use crate::schedule_actor::ScheduleError;

const DEFAULT_BUFFER_SIZE: usize = 32;

/// Generates `PREFIX-001`, `PREFIX-002`, ...
fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = AtomicU64::new(1);
    move || format!("{}-{:03}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub customer_client: CustomerClient,
    pub schedule_client: ScheduleClient,
    handles: Vec<JoinHandle<()>>,
    materializer: Option<JoinHandle<()>>,
}

impl OrderSystem {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(config.actors.buffer_size, config.request_timeout(), config.pricing())
    }

    /// Starts the actors with default buffer and timeout settings.
    pub fn with_pricing(pricing: Pricing) -> Self {
        Self::with_settings(DEFAULT_BUFFER_SIZE, DEFAULT_REQUEST_TIMEOUT, pricing)
    }

    pub fn with_settings(buffer_size: usize, request_timeout: Duration, pricing: Pricing) -> Self {
        // 1. Customer registry
        let (customer_actor, customer_resource_client) =
            ResourceActor::<Customer>::new(buffer_size, sequential_ids("CUS"));
        let customer_client = CustomerClient::new(customer_resource_client.with_timeout(request_timeout));
        let customer_handle = tokio::spawn(customer_actor.run());

        // 2. Orders, validated against the registry
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(buffer_size, sequential_ids("ORD"));
        let order_client = OrderClient::new(
            order_resource_client.with_timeout(request_timeout),
            customer_client.clone(),
            pricing,
        );
        let order_handle = tokio::spawn(order_actor.run());

        // 3. Recurring delivery schedules
        let (schedule_actor, schedule_resource_client) =
            ResourceActor::<DeliverySchedule>::new(buffer_size, sequential_ids("SCH"));
        let schedule_client = ScheduleClient::new(
            schedule_resource_client.with_timeout(request_timeout),
            customer_client.clone(),
        );
        let schedule_handle = tokio::spawn(schedule_actor.run());

        info!(unit_price = pricing.unit_price, "Order system started");

        Self {
            order_client,
            customer_client,
            schedule_client,
            handles: vec![customer_handle, order_handle, schedule_handle],
            materializer: None,
        }
    }

    /// Spawns the background task that places scheduled orders. Calling it
    /// again replaces the running task.
    pub fn start_materializer(&mut self, interval: Duration) {
        if let Some(previous) = self.materializer.take() {
            previous.abort();
        }
        info!(interval_secs = interval.as_secs(), "Starting schedule materializer");
        self.materializer = Some(tokio::spawn(run_materializer(
            self.schedule_client.clone(),
            self.order_client.clone(),
            interval,
        )));
    }

    pub async fn place_due_orders(&self, date: NaiveDate) -> Result<Vec<Order>, ScheduleError> {
        place_due_orders(&self.schedule_client, &self.order_client, date).await
    }

    /// Stops the materializer, closes every actor channel and waits for the
    /// actors to drain. Clones of the clients held elsewhere must be dropped
    /// first, or the actors keep running.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        if let Some(materializer) = self.materializer {
            materializer.abort();
            if let Err(e) = materializer.await {
                if !e.is_cancelled() {
                    error!("Materializer task failed: {:?}", e);
                    return Err(SystemError::ActorTask(e));
                }
            }
        }

        drop(self.order_client);
        drop(self.schedule_client);
        drop(self.customer_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let next = sequential_ids("ORD");
        assert_eq!(next(), "ORD-001");
        assert_eq!(next(), "ORD-002");
    }

    #[tokio::test]
    async fn test_shutdown_completes() {
        let mut system = OrderSystem::with_pricing(Pricing::new(40));
        system.start_materializer(Duration::from_secs(3600));
        system.shutdown().await.unwrap();
    }
}
