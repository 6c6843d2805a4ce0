use tokio::sync::oneshot;

use crate::domain::{Booking, BookingStatus, Driver, Truck};
use crate::driver_actor::{DriverCreate, DriverPatch};
use crate::error::LogisticsResult;
use crate::truck_actor::TruckPatch;

/// Generic type aliases for service communication
pub type ServiceResult<T> = LogisticsResult<T>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// Requests handled by the dispatch actor. Each one is a check-then-mutate
/// sequence spanning more than one store.
#[derive(Debug)]
pub enum DispatchRequest {
    AssignBooking {
        booking_id: String,
        truck_id: String,
        driver_id: String,
        respond_to: ServiceResponse<Booking>,
    },
    UpdateStatus {
        booking_id: String,
        status: BookingStatus,
        respond_to: ServiceResponse<Booking>,
    },
    CreateDriver {
        driver: DriverCreate,
        respond_to: ServiceResponse<Driver>,
    },
    UpdateDriver {
        driver_id: String,
        patch: DriverPatch,
        respond_to: ServiceResponse<Driver>,
    },
    UpdateTruck {
        truck_id: String,
        patch: TruckPatch,
        respond_to: ServiceResponse<Truck>,
    },
    DeleteTruck {
        truck_id: String,
        respond_to: ServiceResponse<()>,
    },
    DeleteDriver {
        driver_id: String,
        respond_to: ServiceResponse<()>,
    },
    SetMaintenance {
        truck_id: String,
        active: bool,
        respond_to: ServiceResponse<Truck>,
    },
    Ping {
        respond_to: ServiceResponse<()>,
    },
    Shutdown,
}
