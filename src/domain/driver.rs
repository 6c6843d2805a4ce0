use chrono::{DateTime, Utc};
use serde::Serialize;

/// A driver who can be dispatched with a truck.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub license_number: String,
    /// Truck this driver usually operates; never one in maintenance.
    pub assigned_truck_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
