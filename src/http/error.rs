use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

use crate::error::LogisticsError;

pub fn status_for(err: &LogisticsError) -> StatusCode {
    match err {
        LogisticsError::Validation(_) => StatusCode::BAD_REQUEST,
        LogisticsError::NotFound { .. } => StatusCode::NOT_FOUND,
        LogisticsError::Conflict(_) | LogisticsError::InvalidTransition { .. } => StatusCode::CONFLICT,
        LogisticsError::Unavailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LogisticsError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        LogisticsError::Forbidden(_) => StatusCode::FORBIDDEN,
        LogisticsError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        LogisticsError::ActorCommunication(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for LogisticsError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, "Request rejected");
        }

        let retryable = self.is_retryable();
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        let mut response = (status, body).into_response();
        if retryable {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from_static("1"));
        }
        response
    }
}

impl From<JsonRejection> for LogisticsError {
    fn from(rejection: JsonRejection) -> Self {
        LogisticsError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for LogisticsError {
    fn from(rejection: QueryRejection) -> Self {
        LogisticsError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingStatus;

    #[test]
    fn every_kind_has_its_status() {
        let cases = [
            (LogisticsError::Validation("x".into()), 400),
            (LogisticsError::not_found("Truck", "truck_1"), 404),
            (LogisticsError::Conflict("x".into()), 409),
            (
                LogisticsError::InvalidTransition {
                    from: BookingStatus::Delivered,
                    to: BookingStatus::Cancelled,
                },
                409,
            ),
            (LogisticsError::Unavailable("x".into()), 422),
            (LogisticsError::Unauthorized("x".into()), 401),
            (LogisticsError::Forbidden("x".into()), 403),
            (LogisticsError::Upstream("x".into()), 503),
            (LogisticsError::ActorCommunication("x".into()), 500),
        ];
        for (err, code) in cases {
            assert_eq!(status_for(&err).as_u16(), code, "{err}");
        }
    }

    #[test]
    fn upstream_failures_ask_for_a_retry() {
        let response = LogisticsError::Upstream("timeout".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[RETRY_AFTER], "1");

        let response = LogisticsError::Conflict("x".into()).into_response();
        assert!(response.headers().get(RETRY_AFTER).is_none());
    }
}
