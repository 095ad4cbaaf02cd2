use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::orders::OrderView;
use super::error::ApiError;
use super::AppState;
use crate::app_system::place_due_orders;
use crate::domain::{DeliverySchedule, NewSchedule};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub customer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RunQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub date: NaiveDate,
    pub placed: Vec<OrderView>,
}

pub async fn create_schedule(
    State(state): State<AppState>,
    payload: Result<Json<NewSchedule>, JsonRejection>,
) -> Result<(StatusCode, Json<DeliverySchedule>), ApiError> {
    let Json(schedule) = payload?;
    let created = state.schedules.create_schedule(schedule).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_schedules(
    State(state): State<AppState>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> Result<Json<Vec<DeliverySchedule>>, ApiError> {
    let Query(query) = query?;
    let schedules = match query.customer_id {
        Some(customer_id) => state.schedules.list_for_customer(&customer_id).await?,
        None => state.schedules.list_schedules().await?,
    };
    Ok(Json(schedules))
}

pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeliverySchedule>, ApiError> {
    Ok(Json(state.schedules.require_schedule(id).await?))
}

pub async fn pause_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeliverySchedule>, ApiError> {
    Ok(Json(state.schedules.pause_schedule(id).await?))
}

pub async fn resume_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeliverySchedule>, ApiError> {
    Ok(Json(state.schedules.resume_schedule(id).await?))
}

/// Places the orders due on `date` (default today). Safe to repeat.
pub async fn run_schedules(
    State(state): State<AppState>,
    query: Result<Query<RunQuery>, QueryRejection>,
) -> Result<Json<RunReport>, ApiError> {
    let Query(query) = query?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let placed = place_due_orders(&state.schedules, &state.orders, date).await?;
    Ok(Json(RunReport {
        date,
        placed: placed.into_iter().map(OrderView::from).collect(),
    }))
}
