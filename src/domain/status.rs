use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogisticsError;

/// Lifecycle of a booking.
///
/// ```text
/// PENDING ──assign──▶ ASSIGNED ──▶ IN_TRANSIT ──▶ DELIVERED
///    │                   │              │
///    └───────────────────┴──────────────┴──────▶ CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Assigned,
        BookingStatus::InTransit,
        BookingStatus::Delivered,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Assigned => "ASSIGNED",
            BookingStatus::InTransit => "IN_TRANSIT",
            BookingStatus::Delivered => "DELIVERED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Delivered | BookingStatus::Cancelled)
    }

    /// The complete edge set of the lifecycle graph.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        match (self, next) {
            (Pending, Assigned) | (Assigned, InTransit) | (InTransit, Delivered) => true,
            (Pending | Assigned | InTransit, Cancelled) => true,
            (Pending, _) | (Assigned, _) | (InTransit, _) => false,
            (Delivered, _) | (Cancelled, _) => false,
        }
    }

    /// Entering this state frees whatever truck the booking holds.
    pub fn releases_truck(self) -> bool {
        self.is_terminal()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = LogisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| LogisticsError::Validation(format!("Unknown booking status: {s}")))
    }
}

/// Availability of a truck in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckAvailability {
    Available,
    Assigned,
    Maintenance,
}

impl TruckAvailability {
    pub fn as_str(self) -> &'static str {
        match self {
            TruckAvailability::Available => "AVAILABLE",
            TruckAvailability::Assigned => "ASSIGNED",
            TruckAvailability::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for TruckAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
