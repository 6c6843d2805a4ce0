use serde::Deserialize;

use crate::error::LogisticsError;

// DTOs for Truck
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckCreate {
    #[serde(default)]
    pub truck_number: String,
    #[serde(rename = "type", default)]
    pub truck_type: String,
    pub capacity: Option<f64>,
}

/// Editable truck fields. Availability is deliberately absent: it moves only
/// through [`TruckAction`](super::TruckAction).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckPatch {
    pub truck_number: Option<String>,
    #[serde(rename = "type")]
    pub truck_type: Option<String>,
    pub capacity: Option<f64>,
}

pub(super) fn non_blank(field: &str, value: &str) -> Result<String, LogisticsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LogisticsError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

pub(super) fn positive_capacity(capacity: f64) -> Result<f64, LogisticsError> {
    if capacity.is_finite() && capacity > 0.0 {
        Ok(capacity)
    } else {
        Err(LogisticsError::Validation(format!(
            "Capacity must be positive, got {capacity}"
        )))
    }
}
