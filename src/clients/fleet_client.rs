use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Driver, Truck};
use crate::driver_actor::{DriverCreate, DriverPatch};
use crate::error::LogisticsResult;
use crate::truck_actor::{TruckAction, TruckCreate, TruckPatch};

/// Client for the truck and driver actors.
///
/// Truck availability, truck edits, driver writes and deletes are cross-store operations;
/// outside this module only the dispatch actor should call the methods that
/// perform them.
#[derive(Clone)]
pub struct FleetClient {
    trucks: ResourceClient<Truck>,
    drivers: ResourceClient<Driver>,
}

impl_client_methods!(FleetClient, trucks, Truck, truck);
impl_client_methods!(FleetClient, drivers, Driver, driver);

impl FleetClient {
    pub fn new(trucks: ResourceClient<Truck>, drivers: ResourceClient<Driver>) -> Self {
        Self { trucks, drivers }
    }

    // --- Trucks ---

    #[instrument(skip(self))]
    pub async fn create_truck(&self, params: TruckCreate) -> LogisticsResult<Truck> {
        debug!("Sending request");
        self.trucks.create(params).await
    }

    #[instrument(skip(self))]
    pub async fn update_truck(&self, id: String, patch: TruckPatch) -> LogisticsResult<Truck> {
        debug!("Sending request");
        self.trucks.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn remove_truck(&self, id: String) -> LogisticsResult<()> {
        debug!("Sending request");
        self.trucks.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn reserve_truck(&self, id: String, load: f64) -> LogisticsResult<Truck> {
        debug!("Sending request");
        self.trucks.perform_action(id, TruckAction::Reserve { load }).await
    }

    #[instrument(skip(self))]
    pub async fn release_truck(&self, id: String) -> LogisticsResult<Truck> {
        debug!("Sending request");
        self.trucks.perform_action(id, TruckAction::Release).await
    }

    #[instrument(skip(self))]
    pub async fn begin_maintenance(&self, id: String) -> LogisticsResult<Truck> {
        debug!("Sending request");
        self.trucks.perform_action(id, TruckAction::BeginMaintenance).await
    }

    #[instrument(skip(self))]
    pub async fn end_maintenance(&self, id: String) -> LogisticsResult<Truck> {
        debug!("Sending request");
        self.trucks.perform_action(id, TruckAction::EndMaintenance).await
    }

    // --- Drivers ---

    #[instrument(skip(self))]
    pub async fn insert_driver(&self, params: DriverCreate) -> LogisticsResult<Driver> {
        debug!("Sending request");
        self.drivers.create(params).await
    }

    #[instrument(skip(self))]
    pub async fn patch_driver(&self, id: String, patch: DriverPatch) -> LogisticsResult<Driver> {
        debug!("Sending request");
        self.drivers.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn remove_driver(&self, id: String) -> LogisticsResult<()> {
        debug!("Sending request");
        self.drivers.delete(id).await
    }

    /// Drivers whose usual truck is `truck_id`.
    #[instrument(skip(self))]
    pub async fn drivers_linked_to(&self, truck_id: &str) -> LogisticsResult<Vec<Driver>> {
        let drivers = self.drivers.list().await?;
        Ok(drivers
            .into_iter()
            .filter(|d| d.assigned_truck_id.as_deref() == Some(truck_id))
            .collect())
    }
}
