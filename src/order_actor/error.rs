use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::{OrderStatus, PaymentMethod, PaymentStatus};

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Cannot {action} order {order_id}: order is {from}")]
    InvalidTransition {
        order_id: String,
        action: &'static str,
        from: OrderStatus,
    },
    #[error("Cannot {action} order {order_id}: {method} payment is {status}")]
    InvalidPaymentTransition {
        order_id: String,
        action: &'static str,
        method: PaymentMethod,
        status: PaymentStatus,
    },
    #[error("Order {order_id} cannot be delivered: {method} payment is {status}")]
    PaymentGate {
        order_id: String,
        method: PaymentMethod,
        status: PaymentStatus,
    },
    #[error("Invalid customer: {0}")]
    InvalidCustomer(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
