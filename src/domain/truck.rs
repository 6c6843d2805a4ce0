use chrono::{DateTime, Utc};
use serde::Serialize;

use super::TruckAvailability;

/// A truck in the fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: String,
    pub truck_number: String,
    #[serde(rename = "type")]
    pub truck_type: String,
    /// Tons.
    pub capacity: f64,
    pub availability_status: TruckAvailability,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Truck {
    pub fn is_available(&self) -> bool {
        self.availability_status == TruckAvailability::Available
    }

    pub fn can_carry(&self, weight: f64) -> bool {
        self.capacity >= weight
    }
}
