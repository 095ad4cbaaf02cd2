use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{quantity_in_range, DeliverySchedule, ScheduleCreate, MAX_QUANTITY_PER_ORDER};
use super::actions::ScheduleAction;
use super::error::ScheduleError;

impl Entity for DeliverySchedule {
    type Id = String;
    type CreateParams = ScheduleCreate;
    type Patch = Infallible;
    type Action = ScheduleAction;
    type ActionResult = DeliverySchedule;
    type Error = ScheduleError;

    const KIND: &'static str = "schedule";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates an active schedule that has not placed any order yet.
    fn from_create_params(id: String, params: ScheduleCreate) -> Result<Self, ScheduleError> {
        if !quantity_in_range(params.quantity) {
            return Err(ScheduleError::ValidationError(format!(
                "Quantity must be between 1 and {}, got {}",
                MAX_QUANTITY_PER_ORDER, params.quantity
            )));
        }
        if !params.frequency.is_valid() {
            return Err(ScheduleError::ValidationError(format!(
                "Invalid frequency: {:?}",
                params.frequency
            )));
        }

        Ok(Self {
            id,
            customer_id: params.customer_id,
            quantity: params.quantity,
            payment_method: params.payment_method,
            frequency: params.frequency,
            slot: params.slot,
            active: true,
            created_at: params.created_at,
            last_placed_on: None,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), ScheduleError> {
        match patch {}
    }

    fn handle_action(&mut self, action: ScheduleAction) -> Result<DeliverySchedule, ScheduleError> {
        match action {
            ScheduleAction::Pause => {
                if !self.active {
                    return Err(ScheduleError::Conflict(format!("{} is already paused", self.id)));
                }
                self.active = false;
            }
            ScheduleAction::Resume => {
                if self.active {
                    return Err(ScheduleError::Conflict(format!("{} is already active", self.id)));
                }
                self.active = true;
            }
            ScheduleAction::ClaimDate(date) => {
                if !self.is_due_on(date) {
                    return Err(ScheduleError::Conflict(format!("{} is not due on {}", self.id, date)));
                }
                self.last_placed_on = Some(date);
            }
            ScheduleAction::ReleaseClaim { date, previous } => {
                if self.last_placed_on != Some(date) {
                    return Err(ScheduleError::Conflict(format!("{} has no claim on {}", self.id, date)));
                }
                self.last_placed_on = previous;
            }
        }
        Ok(self.clone())
    }
}
