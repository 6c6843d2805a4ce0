use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::LogisticsResult;
use crate::http::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub component: &'static str,
    pub ok: bool,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub components: Vec<ComponentHealth>,
}

/// Asks every actor for a trivial answer and reports the ones that are slow
/// or gone.
///
/// A response over the timeout means the actor's queue is blocked, most
/// likely by a handler waiting on something it should not.
pub async fn check_health(state: &AppState, timeout: Duration) -> HealthReport {
    let components = vec![
        probe("bookings", timeout, async { state.bookings.count_bookings().await.map(drop) }).await,
        probe("trucks", timeout, async { state.fleet.count_trucks().await.map(drop) }).await,
        probe("drivers", timeout, async { state.fleet.count_drivers().await.map(drop) }).await,
        probe("users", timeout, async { state.users.count_users().await.map(drop) }).await,
        probe("dispatch", timeout, state.dispatch.ping()).await,
    ];

    HealthReport {
        healthy: components.iter().all(|c| c.ok),
        components,
    }
}

async fn probe(
    component: &'static str,
    timeout: Duration,
    check: impl Future<Output = LogisticsResult<()>>,
) -> ComponentHealth {
    let start = Instant::now();
    let outcome = tokio::time::timeout(timeout, check).await;
    let elapsed = start.elapsed();
    let duration_ms = elapsed.as_millis() as u64;

    let error = match outcome {
        Ok(Ok(())) => {
            log_response_time(component, elapsed, timeout);
            None
        }
        Ok(Err(e)) => {
            error!(component, error = %e, duration_ms, "Health check failed");
            Some(e.to_string())
        }
        Err(_) => {
            error!(
                component,
                timeout_ms = timeout.as_millis() as u64,
                "Health check timed out - actor may be blocked/overloaded"
            );
            Some(format!("no answer within {} ms", timeout.as_millis()))
        }
    };

    ComponentHealth {
        component,
        ok: error.is_none(),
        duration_ms,
        error,
    }
}

fn log_response_time(component: &'static str, elapsed: Duration, timeout: Duration) {
    let duration_ms = elapsed.as_millis() as u64;
    if elapsed > timeout / 5 {
        warn!(component, duration_ms, "Health check slow but completed - potential overload");
    } else {
        debug!(component, duration_ms, "Health check completed normally");
    }
}
