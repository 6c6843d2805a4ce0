use thiserror::Error;

use crate::domain::BookingStatus;

/// Every failure the booking service reports to a caller.
///
/// Variants map one-to-one onto the HTTP status codes in `http::error`, so
/// callers can tell a stale booking (`Conflict`) from a busy truck
/// (`Unavailable`) without parsing messages.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LogisticsError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },
    #[error("Unavailable: {0}")]
    Unavailable(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Upstream failure: {0}")]
    Upstream(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl LogisticsError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        LogisticsError::NotFound { entity, id: id.into() }
    }

    /// Stable machine-readable code sent alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            LogisticsError::Validation(_) => "VALIDATION",
            LogisticsError::NotFound { .. } => "NOT_FOUND",
            LogisticsError::Conflict(_) => "CONFLICT",
            LogisticsError::InvalidTransition { .. } => "INVALID_TRANSITION",
            LogisticsError::Unavailable(_) => "UNAVAILABLE",
            LogisticsError::Unauthorized(_) => "UNAUTHORIZED",
            LogisticsError::Forbidden(_) => "FORBIDDEN",
            LogisticsError::Upstream(_) => "UPSTREAM",
            LogisticsError::ActorCommunication(_) => "INTERNAL",
        }
    }

    /// Only collaborator failures are worth retrying unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LogisticsError::Upstream(_))
    }
}

pub type LogisticsResult<T> = std::result::Result<T, LogisticsError>;
