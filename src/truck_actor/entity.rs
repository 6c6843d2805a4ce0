use chrono::Utc;

use super::actions::TruckAction;
use super::dtos::{non_blank, positive_capacity, TruckCreate, TruckPatch};
use crate::actor_framework::Entity;
use crate::domain::{Truck, TruckAvailability};
use crate::error::LogisticsError;

impl Entity for Truck {
    type Id = String;
    type CreateParams = TruckCreate;
    type Patch = TruckPatch;
    type Action = TruckAction;
    type ActionResult = Truck;

    const KIND: &'static str = "Truck";

    fn id(&self) -> &String {
        &self.id
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.truck_number.to_uppercase())
    }

    /// New trucks join the fleet AVAILABLE.
    fn from_create_params(id: String, params: TruckCreate) -> Result<Self, LogisticsError> {
        let capacity = params
            .capacity
            .ok_or_else(|| LogisticsError::Validation("Capacity is required".to_string()))?;

        let now = Utc::now();
        Ok(Self {
            id,
            truck_number: non_blank("Truck number", &params.truck_number)?,
            truck_type: non_blank("Type", &params.truck_type)?,
            capacity: positive_capacity(capacity)?,
            availability_status: TruckAvailability::Available,
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, patch: TruckPatch) -> Result<(), LogisticsError> {
        if let Some(number) = patch.truck_number {
            self.truck_number = non_blank("Truck number", &number)?;
        }
        if let Some(truck_type) = patch.truck_type {
            self.truck_type = non_blank("Type", &truck_type)?;
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = positive_capacity(capacity)?;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn on_delete(&self) -> Result<(), LogisticsError> {
        if self.availability_status == TruckAvailability::Assigned {
            return Err(LogisticsError::Conflict(format!(
                "Truck {} is assigned to an active booking",
                self.truck_number
            )));
        }
        Ok(())
    }

    fn handle_action(&mut self, action: TruckAction) -> Result<Truck, LogisticsError> {
        use TruckAvailability::*;

        let next = match (action, self.availability_status) {
            (TruckAction::Reserve { load }, Available) => {
                if !self.can_carry(load) {
                    return Err(LogisticsError::Unavailable(format!(
                        "Truck {} carries {} tons, load is {} tons",
                        self.truck_number, self.capacity, load
                    )));
                }
                Assigned
            }
            (TruckAction::Reserve { .. }, current) | (TruckAction::BeginMaintenance, current @ (Assigned | Maintenance)) => {
                return Err(LogisticsError::Unavailable(format!(
                    "Truck {} is {}",
                    self.truck_number, current
                )));
            }
            (TruckAction::Release, Assigned) => Available,
            (TruckAction::BeginMaintenance, Available) => Maintenance,
            (TruckAction::EndMaintenance, Maintenance) => Available,
            (action @ (TruckAction::Release | TruckAction::EndMaintenance), current) => {
                return Err(LogisticsError::Conflict(format!(
                    "Truck {} is {}; cannot apply {:?}",
                    self.truck_number, current, action
                )));
            }
        };

        self.availability_status = next;
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}
