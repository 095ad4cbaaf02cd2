//! HTTP/JSON surface of the order service.

mod customers;
mod dashboard;
mod error;
mod orders;
mod schedules;


use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_system::{check_health, HealthReport, OrderSystem, HEALTH_CHECK_TIMEOUT};
use crate::clients::{CustomerClient, OrderClient, ScheduleClient};

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub customers: CustomerClient,
    pub schedules: ScheduleClient,
    pub currency: Arc<str>,
}

impl AppState {
    pub fn new(system: &OrderSystem, currency: &str) -> Self {
        Self {
            orders: system.order_client.clone(),
            customers: system.customer_client.clone(),
            schedules: system.schedule_client.clone(),
            currency: Arc::from(currency),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/orders", post(orders::create_order).get(orders::list_orders))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/accept", post(orders::accept_order))
        .route("/orders/{id}/cancel", post(orders::cancel_order))
        .route("/orders/{id}/dispatch", post(orders::dispatch_order))
        .route("/orders/{id}/deliver", post(orders::deliver_order))
        .route("/orders/{id}/verify-payment", post(orders::verify_payment))
        .route("/orders/{id}/reject-payment", post(orders::reject_payment))
        .route("/dashboard/pending", get(dashboard::pending_orders))
        .route("/dashboard/active", get(dashboard::active_orders))
        .route("/dashboard/delivered", get(dashboard::delivered_orders))
        .route("/dashboard/summary", get(dashboard::summary))
        .route(
            "/customers",
            post(customers::register_customer).get(customers::list_customers),
        )
        .route(
            "/customers/{id}",
            get(customers::get_customer).patch(customers::update_customer),
        )
        .route(
            "/schedules",
            post(schedules::create_schedule).get(schedules::list_schedules),
        )
        .route("/schedules/run", post(schedules::run_schedules))
        .route("/schedules/{id}", get(schedules::get_schedule))
        .route("/schedules/{id}/pause", post(schedules::pause_schedule))
        .route("/schedules/{id}/resume", post(schedules::resume_schedule))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = router(state);
    tracing::info!(address = ?listener.local_addr().ok(), "AquaEase API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = check_health(&state.orders, HEALTH_CHECK_TIMEOUT).await;
    let status = if report.is_available() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
