use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::orders::{views, OrderView};
use super::error::ApiError;
use super::AppState;
use crate::domain::DashboardSummary;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Defaults to today (UTC).
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub unit_price: u64,
    pub currency: String,
}

pub async fn pending_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderView>>, ApiError> {
    Ok(views(state.orders.pending_orders().await?))
}

pub async fn active_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderView>>, ApiError> {
    Ok(views(state.orders.active_orders().await?))
}

pub async fn delivered_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderView>>, ApiError> {
    Ok(views(state.orders.delivered_orders().await?))
}

pub async fn summary(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<SummaryView>, ApiError> {
    let Query(query) = query?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let summary = state.orders.summary(date).await?;
    Ok(Json(SummaryView {
        summary,
        unit_price: state.orders.pricing().unit_price,
        currency: state.currency.to_string(),
    }))
}
