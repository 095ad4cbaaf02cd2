use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use std::fmt;

use crate::customer_actor::CustomerError;
use crate::order_actor::OrderError;
use crate::schedule_actor::ScheduleError;

/// JSON error body: `{"error": CODE, "message": text}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// An error on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status.as_u16(), self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = self.code, message = %self.message, "Request rejected");
        }
        let body = ErrorResponse {
            error: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::NotFound(_) => Self::not_found(message),
            OrderError::InvalidTransition { .. } => {
                Self::new(StatusCode::CONFLICT, "INVALID_TRANSITION", message)
            }
            OrderError::InvalidPaymentTransition { .. } => {
                Self::new(StatusCode::CONFLICT, "INVALID_PAYMENT_TRANSITION", message)
            }
            OrderError::PaymentGate { .. } => {
                Self::new(StatusCode::CONFLICT, "PAYMENT_NOT_VERIFIED", message)
            }
            OrderError::InvalidCustomer(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_CUSTOMER", message)
            }
            OrderError::ValidationError(_) => Self::bad_request(message),
            OrderError::ActorCommunicationError(_) => Self::unavailable(message),
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(e: CustomerError) -> Self {
        let message = e.to_string();
        match e {
            CustomerError::NotFound(_) => Self::not_found(message),
            CustomerError::ValidationError(_) => Self::bad_request(message),
            CustomerError::ActorCommunicationError(_) => Self::unavailable(message),
        }
    }
}

impl From<ScheduleError> for ApiError {
    fn from(e: ScheduleError) -> Self {
        let message = e.to_string();
        match e {
            ScheduleError::NotFound(_) => Self::not_found(message),
            ScheduleError::InvalidCustomer(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_CUSTOMER", message)
            }
            ScheduleError::ValidationError(_) => Self::bad_request(message),
            ScheduleError::Conflict(_) => Self::new(StatusCode::CONFLICT, "CONFLICT", message),
            ScheduleError::ActorCommunicationError(_) => Self::unavailable(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
