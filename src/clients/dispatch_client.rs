use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{Booking, BookingStatus, Driver, Truck};
use crate::driver_actor::{DriverCreate, DriverPatch};
use crate::error::{LogisticsError, LogisticsResult};
use crate::messages::DispatchRequest;
use crate::truck_actor::TruckPatch;

macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> LogisticsResult<$return_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| LogisticsError::ActorCommunication("Dispatch actor closed".to_string()))?;

                response.await.map_err(|_| LogisticsError::ActorCommunication("Dispatch actor dropped".to_string()))?
            }
        }
    };
}

/// Handle on the dispatch actor.
#[derive(Clone)]
pub struct DispatchClient {
    sender: mpsc::Sender<DispatchRequest>,
}

impl DispatchClient {
    pub fn new(sender: mpsc::Sender<DispatchRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> LogisticsResult<()> {
        debug!("Sending shutdown request");
        self.sender
            .send(DispatchRequest::Shutdown)
            .await
            .map_err(|e| LogisticsError::ActorCommunication(e.to_string()))
    }
}

client_method!(DispatchClient => fn assign_booking(booking_id: String, truck_id: String, driver_id: String) -> Booking as DispatchRequest::AssignBooking);
client_method!(DispatchClient => fn update_status(booking_id: String, status: BookingStatus) -> Booking as DispatchRequest::UpdateStatus);
client_method!(DispatchClient => fn create_driver(driver: DriverCreate) -> Driver as DispatchRequest::CreateDriver);
client_method!(DispatchClient => fn update_driver(driver_id: String, patch: DriverPatch) -> Driver as DispatchRequest::UpdateDriver);
client_method!(DispatchClient => fn update_truck(truck_id: String, patch: TruckPatch) -> Truck as DispatchRequest::UpdateTruck);
client_method!(DispatchClient => fn delete_truck(truck_id: String) -> () as DispatchRequest::DeleteTruck);
client_method!(DispatchClient => fn delete_driver(driver_id: String) -> () as DispatchRequest::DeleteDriver);
client_method!(DispatchClient => fn set_maintenance(truck_id: String, active: bool) -> Truck as DispatchRequest::SetMaintenance);
client_method!(DispatchClient => fn ping() -> () as DispatchRequest::Ping);
