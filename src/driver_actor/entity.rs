use chrono::Utc;

use super::dtos::{non_blank, truck_link, DriverCreate, DriverPatch};
use crate::actor_framework::Entity;
use crate::domain::Driver;
use crate::error::LogisticsError;

impl Entity for Driver {
    type Id = String;
    type CreateParams = DriverCreate;
    type Patch = DriverPatch;
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "Driver";

    fn id(&self) -> &String {
        &self.id
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.license_number.to_uppercase())
    }

    fn from_create_params(id: String, params: DriverCreate) -> Result<Self, LogisticsError> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: non_blank("Name", &params.name)?,
            phone: non_blank("Phone", &params.phone)?,
            license_number: non_blank("License number", &params.license_number)?,
            assigned_truck_id: truck_link(params.assigned_truck_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, patch: DriverPatch) -> Result<(), LogisticsError> {
        if let Some(name) = patch.name {
            self.name = non_blank("Name", &name)?;
        }
        if let Some(phone) = patch.phone {
            self.phone = non_blank("Phone", &phone)?;
        }
        if let Some(license) = patch.license_number {
            self.license_number = non_blank("License number", &license)?;
        }
        if let Some(link) = patch.assigned_truck_id {
            self.assigned_truck_id = truck_link(link);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), LogisticsError> {
        Ok(())
    }
}
