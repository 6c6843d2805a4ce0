use serde::{Deserialize, Deserializer};

use crate::error::LogisticsError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub license_number: String,
    pub assigned_truck_id: Option<String>,
}

/// Editable driver fields.
///
/// `assigned_truck_id` distinguishes "leave as is" (absent) from "unlink"
/// (`null`) and "link" (a string).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_truck_id: Option<Option<String>>,
}

impl DriverPatch {
    /// The truck this patch links the driver to, if it sets one.
    pub fn linked_truck(&self) -> Option<&str> {
        self.assigned_truck_id
            .as_ref()
            .and_then(|t| t.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Normalizes a truck link: trimmed, with blank meaning no link.
pub(super) fn truck_link(link: Option<String>) -> Option<String> {
    link.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

pub(super) fn non_blank(field: &str, value: &str) -> Result<String, LogisticsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LogisticsError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}
