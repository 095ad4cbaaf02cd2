use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during schedule operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule not found: {0}")]
    NotFound(String),
    #[error("Invalid customer: {0}")]
    InvalidCustomer(String),
    #[error("Schedule validation error: {0}")]
    ValidationError(String),
    #[error("Schedule conflict: {0}")]
    Conflict(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ScheduleError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ScheduleError::NotFound(id),
            other => ScheduleError::ActorCommunicationError(other.to_string()),
        }
    }
}
