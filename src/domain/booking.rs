use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BookingStatus;
use crate::error::LogisticsError;

/// A shipment request moving through the booking lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub load_type: String,
    /// Tons.
    pub weight: f64,
    /// Kilometres.
    pub distance: f64,
    pub price: f64,
    pub status: BookingStatus,
    /// Truck and driver travel together: both are bound or neither is.
    #[serde(flatten)]
    pub assignment: Option<Assignment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn truck_id(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.truck_id.as_str())
    }

    pub fn driver_id(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.driver_id.as_str())
    }

    /// True while the booking still holds on to its truck and driver.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Truck and driver bound to a booking by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub truck_id: String,
    pub truck_number: String,
    pub driver_id: String,
    pub driver_name: String,
}

/// Who asked for the shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Requester {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
}

/// Shipment request as submitted by a user, before pricing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub drop_location: String,
    #[serde(default)]
    pub load_type: String,
    pub weight: Option<f64>,
}

/// A draft that passed validation; fields are trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub pickup_location: String,
    pub drop_location: String,
    pub load_type: String,
    pub weight: f64,
}

impl BookingDraft {
    pub fn new(
        pickup_location: impl Into<String>,
        drop_location: impl Into<String>,
        load_type: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            pickup_location: pickup_location.into(),
            drop_location: drop_location.into(),
            load_type: load_type.into(),
            weight: Some(weight),
        }
    }

    pub fn validate(&self) -> Result<ValidDraft, LogisticsError> {
        let pickup = required("Pickup location", &self.pickup_location)?;
        let drop = required("Drop location", &self.drop_location)?;
        let load_type = required("Load type", &self.load_type)?;

        let weight = self
            .weight
            .ok_or_else(|| LogisticsError::Validation("Weight is required".to_string()))?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(LogisticsError::Validation(format!(
                "Weight must be positive, got {weight}"
            )));
        }

        if pickup.to_lowercase() == drop.to_lowercase() {
            return Err(LogisticsError::Validation(
                "Pickup and drop locations must differ".to_string(),
            ));
        }

        Ok(ValidDraft {
            pickup_location: pickup,
            drop_location: drop,
            load_type,
            weight,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, LogisticsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LogisticsError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Payload for persisting a priced booking.
#[derive(Debug, Clone)]
pub struct BookingCreate {
    pub requester: Requester,
    pub draft: ValidDraft,
    pub distance: f64,
    pub price: f64,
}
