//! Turns due delivery schedules into pending orders.

use chrono::{NaiveDate, Utc};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::clients::{OrderClient, ScheduleClient};
use crate::domain::Order;
use crate::schedule_actor::ScheduleError;

/// Places one order for every schedule due on `date`.
///
/// Each schedule claims the date before its order is created, so repeated or
/// overlapping runs for the same date never place a second order. A claimed
/// schedule whose order then fails releases its claim, so the next run
/// retries it.
#[instrument(skip(schedules, orders), fields(date = %date))]
pub async fn place_due_orders(
    schedules: &ScheduleClient,
    orders: &OrderClient,
    date: NaiveDate,
) -> Result<Vec<Order>, ScheduleError> {
    let due = schedules.due_on(date).await?;
    debug!(due = due.len(), "Found due schedules");

    let mut placed = Vec::with_capacity(due.len());
    for schedule in due {
        match schedules.claim_date(schedule.id.clone(), date).await {
            Ok(_) => {}
            Err(ScheduleError::Conflict(reason)) => {
                debug!(schedule_id = %schedule.id, %reason, "Skipping schedule");
                continue;
            }
            Err(e) => return Err(e),
        }

        match orders.place_scheduled_order(&schedule).await {
            Ok(order) => {
                info!(schedule_id = %schedule.id, order_id = %order.id, "Scheduled order placed");
                placed.push(order);
            }
            Err(e) => {
                error!(schedule_id = %schedule.id, error = %e, "Scheduled order failed");
                match schedules
                    .release_claim(schedule.id.clone(), date, schedule.last_placed_on)
                    .await
                {
                    Ok(_) => info!(schedule_id = %schedule.id, "Claim released for retry"),
                    Err(e) => error!(schedule_id = %schedule.id, error = %e, "Claim release failed"),
                }
            }
        }
    }

    Ok(placed)
}

/// Runs [`place_due_orders`] for the current UTC date every `interval`.
pub async fn run_materializer(schedules: ScheduleClient, orders: OrderClient, interval: Duration) {
    let mut interval_timer = tokio::time::interval(interval);

    loop {
        interval_timer.tick().await;
        let today = Utc::now().date_naive();
        match place_due_orders(&schedules, &orders, today).await {
            Ok(placed) if !placed.is_empty() => info!(count = placed.len(), "Materialized scheduled orders"),
            Ok(_) => {}
            Err(e) => error!(error = %e, "Schedule materialization failed"),
        }
    }
}
