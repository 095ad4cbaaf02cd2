use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::error::ApiError;
use super::AppState;
use crate::domain::{Customer, CustomerPatch, NewCustomer};

pub async fn register_customer(
    State(state): State<AppState>,
    payload: Result<Json<NewCustomer>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(registration) = payload?;
    let customer = state.customers.register_customer(registration).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customers.list_customers().await?))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.customers.require_customer(id).await?))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerPatch>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Json(patch) = payload?;
    Ok(Json(state.customers.update_customer(id, patch).await?))
}
