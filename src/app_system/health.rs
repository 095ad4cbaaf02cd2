use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use crate::clients::OrderClient;

pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_millis(500);

/// Responses slower than this are reported as degraded.
const SLOW_RESPONSE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub latency_ms: u64,
}

impl HealthReport {
    pub fn is_available(&self) -> bool {
        self.status != HealthStatus::Unavailable
    }
}

/// Round-trips a lookup through the order actor.
///
/// A lookup that hangs past `timeout` means the actor is blocked or gone.
pub async fn check_health(order_client: &OrderClient, timeout: Duration) -> HealthReport {
    let start = Instant::now();

    let status = match tokio::time::timeout(timeout, order_client.get_order("health_check".to_string())).await {
        Ok(Ok(_)) => {
            let elapsed = start.elapsed();
            if elapsed > SLOW_RESPONSE {
                warn!(
                    duration_ms = elapsed.as_millis() as u64,
                    "Health check slow but completed - potential server overload"
                );
                HealthStatus::Degraded
            } else {
                debug!(duration_ms = elapsed.as_millis() as u64, "Health check completed normally");
                HealthStatus::Healthy
            }
        }
        Ok(Err(e)) => {
            error!(error = %e, duration_ms = start.elapsed().as_millis() as u64, "Health check failed");
            HealthStatus::Unavailable
        }
        Err(_) => {
            error!(
                timeout_ms = timeout.as_millis() as u64,
                "Health check timed out - server may be blocked/overloaded"
            );
            HealthStatus::Unavailable
        }
    };

    HealthReport {
        status,
        latency_ms: start.elapsed().as_millis() as u64,
    }
}
