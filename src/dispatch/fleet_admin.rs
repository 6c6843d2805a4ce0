use tracing::{info, instrument, warn};

use super::DispatchService;
use crate::domain::{Driver, Truck, TruckAvailability};
use crate::driver_actor::{DriverCreate, DriverPatch};
use crate::error::{LogisticsError, LogisticsResult};
use crate::truck_actor::TruckPatch;

impl DispatchService {
    #[instrument(skip(self, driver), fields(license = %driver.license_number))]
    pub(super) async fn create_driver(&self, driver: DriverCreate) -> LogisticsResult<Driver> {
        if let Some(truck_id) = driver.assigned_truck_id.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            self.ensure_linkable(truck_id).await?;
        }
        let created = self.fleet.insert_driver(driver).await?;
        info!(driver_id = %created.id, "Driver created");
        Ok(created)
    }

    #[instrument(fields(driver_id = %driver_id), skip(self, patch))]
    pub(super) async fn update_driver(&self, driver_id: String, patch: DriverPatch) -> LogisticsResult<Driver> {
        self.fleet.fetch_driver(driver_id.clone()).await?;
        if let Some(truck_id) = patch.linked_truck() {
            self.ensure_linkable(truck_id).await?;
        }
        self.fleet.patch_driver(driver_id, patch).await
    }

    /// A driver may only be linked to an existing truck outside maintenance.
    async fn ensure_linkable(&self, truck_id: &str) -> LogisticsResult<Truck> {
        let truck = self.fleet.fetch_truck(truck_id.to_string()).await?;
        if truck.availability_status == TruckAvailability::Maintenance {
            return Err(LogisticsError::Unavailable(format!(
                "Truck {} is in maintenance",
                truck.truck_number
            )));
        }
        Ok(truck)
    }

    /// An ASSIGNED truck keeps its number and capacity until it is released,
    /// so the active booking's copy of them stays true.
    #[instrument(fields(truck_id = %truck_id), skip(self, patch))]
    pub(super) async fn update_truck(&self, truck_id: String, patch: TruckPatch) -> LogisticsResult<Truck> {
        let truck = self.fleet.fetch_truck(truck_id.clone()).await?;

        if truck.availability_status == TruckAvailability::Assigned
            && (patch.truck_number.is_some() || patch.capacity.is_some())
        {
            warn!("Edit of an assigned truck refused");
            return Err(LogisticsError::Conflict(format!(
                "Truck {} is assigned to an active booking; number and capacity are locked",
                truck.truck_number
            )));
        }

        self.fleet.update_truck(truck_id, patch).await
    }

    #[instrument(fields(truck_id = %truck_id), skip(self))]
    pub(super) async fn delete_truck(&self, truck_id: String) -> LogisticsResult<()> {
        let truck = self.fleet.fetch_truck(truck_id.clone()).await?;

        if let Some(booking) = self
            .bookings
            .list_active()
            .await?
            .into_iter()
            .find(|b| b.truck_id() == Some(truck_id.as_str()))
        {
            warn!(booking_id = %booking.id, "Truck still bound to an active booking");
            return Err(LogisticsError::Conflict(format!(
                "Truck {} is bound to active booking {}",
                truck.truck_number, booking.id
            )));
        }

        let linked = self.fleet.drivers_linked_to(&truck_id).await?;
        if let Some(driver) = linked.first() {
            warn!(driver_id = %driver.id, "Truck still linked to a driver");
            return Err(LogisticsError::Conflict(format!(
                "Truck {} is linked to driver {}",
                truck.truck_number, driver.name
            )));
        }

        // The store also refuses ASSIGNED trucks on its own.
        self.fleet.remove_truck(truck_id).await?;
        info!("Truck deleted");
        Ok(())
    }

    #[instrument(fields(driver_id = %driver_id), skip(self))]
    pub(super) async fn delete_driver(&self, driver_id: String) -> LogisticsResult<()> {
        let driver = self.fleet.fetch_driver(driver_id.clone()).await?;

        if let Some(booking) = self
            .bookings
            .list_active()
            .await?
            .into_iter()
            .find(|b| b.driver_id() == Some(driver_id.as_str()))
        {
            warn!(booking_id = %booking.id, "Driver still bound to an active booking");
            return Err(LogisticsError::Conflict(format!(
                "Driver {} is bound to active booking {}",
                driver.name, booking.id
            )));
        }

        self.fleet.remove_driver(driver_id).await?;
        info!("Driver deleted");
        Ok(())
    }

    #[instrument(fields(truck_id = %truck_id, active), skip(self))]
    pub(super) async fn set_maintenance(&self, truck_id: String, active: bool) -> LogisticsResult<Truck> {
        let truck = self.fleet.fetch_truck(truck_id.clone()).await?;

        let updated = if active {
            if !truck.is_available() {
                return Err(LogisticsError::Unavailable(format!(
                    "Truck {} is {}",
                    truck.truck_number, truck.availability_status
                )));
            }
            if let Some(driver) = self.fleet.drivers_linked_to(&truck_id).await?.first() {
                return Err(LogisticsError::Conflict(format!(
                    "Truck {} is linked to driver {}",
                    truck.truck_number, driver.name
                )));
            }
            self.fleet.begin_maintenance(truck_id).await?
        } else {
            self.fleet.end_maintenance(truck_id).await?
        };

        info!(availability = %updated.availability_status, "Maintenance updated");
        Ok(updated)
    }
}
