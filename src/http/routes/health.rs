use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::app_system::{check_health, HealthReport};
use crate::http::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = check_health(&state, state.health_timeout).await;
    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
