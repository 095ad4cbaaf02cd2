use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::domain::{NewOrder, Order, OrderStatus};

/// An order as returned by the API, with its derived amount.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub amount: u64,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let amount = order.compute_amount();
        Self { order, amount }
    }
}

pub(crate) fn views(orders: Vec<Order>) -> Json<Vec<OrderView>> {
    Json(orders.into_iter().map(OrderView::from).collect())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Seller,
    Customer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub role: Role,
    pub customer_id: Option<String>,
}

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderView>), ApiError> {
    let Json(order) = payload?;
    let created = state.orders.create_order(order).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    let order = state.orders.require_order(id).await?;
    Ok(Json(order.into()))
}

/// Sellers see every order; customers only their own.
pub async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<OrderQuery>, QueryRejection>,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let Query(query) = query?;

    let orders = match (query.role, query.customer_id) {
        (Role::Customer, None) => {
            return Err(ApiError::bad_request("customerId is required for the customer role"));
        }
        (_, Some(customer_id)) => state.orders.list_for_customer(&customer_id).await?,
        (Role::Seller, None) => state.orders.list_orders().await?,
    };

    let orders = match query.status {
        Some(status) => orders.into_iter().filter(|o| o.status == status).collect(),
        None => orders,
    };
    Ok(views(orders))
}

pub async fn accept_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    Ok(Json(state.orders.accept_order(id).await?.into()))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    Ok(Json(state.orders.cancel_order(id).await?.into()))
}

pub async fn dispatch_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    Ok(Json(state.orders.dispatch_order(id).await?.into()))
}

pub async fn deliver_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    Ok(Json(state.orders.deliver_order(id).await?.into()))
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    Ok(Json(state.orders.verify_payment(id).await?.into()))
}

pub async fn reject_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    Ok(Json(state.orders.reject_payment(id).await?.into()))
}
