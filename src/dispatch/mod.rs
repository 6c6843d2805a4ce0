//! Root orchestrator for every workflow that spans stores.
//!
//! Requests are handled one at a time, so each check-then-mutate sequence
//! (assignment, status change, fleet deletion, driver linking, maintenance)
//! runs without interleaving with another. This single queue is the only
//! lock the system needs.

mod assignment;
mod fleet_admin;
mod transition;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::{BookingClient, DispatchClient, FleetClient};
use crate::messages::DispatchRequest;

pub struct DispatchService {
    receiver: mpsc::Receiver<DispatchRequest>,
    bookings: BookingClient,
    fleet: FleetClient,
}

impl DispatchService {
    pub fn new(buffer_size: usize, bookings: BookingClient, fleet: FleetClient) -> (Self, DispatchClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            bookings,
            fleet,
        };
        (service, DispatchClient::new(sender))
    }

    #[instrument(name = "dispatch_service", skip(self))]
    pub async fn run(mut self) {
        info!("DispatchService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DispatchRequest::AssignBooking {
                    booking_id,
                    truck_id,
                    driver_id,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.assign_booking(booking_id, truck_id, driver_id).await);
                }
                DispatchRequest::UpdateStatus {
                    booking_id,
                    status,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.update_status(booking_id, status).await);
                }
                DispatchRequest::CreateDriver { driver, respond_to } => {
                    let _ = respond_to.send(self.create_driver(driver).await);
                }
                DispatchRequest::UpdateDriver {
                    driver_id,
                    patch,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.update_driver(driver_id, patch).await);
                }
                DispatchRequest::UpdateTruck {
                    truck_id,
                    patch,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.update_truck(truck_id, patch).await);
                }
                DispatchRequest::DeleteTruck { truck_id, respond_to } => {
                    let _ = respond_to.send(self.delete_truck(truck_id).await);
                }
                DispatchRequest::DeleteDriver { driver_id, respond_to } => {
                    let _ = respond_to.send(self.delete_driver(driver_id).await);
                }
                DispatchRequest::SetMaintenance {
                    truck_id,
                    active,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.set_maintenance(truck_id, active).await);
                }
                DispatchRequest::Ping { respond_to } => {
                    debug!("Ping");
                    let _ = respond_to.send(Ok(()));
                }
                DispatchRequest::Shutdown => {
                    info!("DispatchService shutting down");
                    break;
                }
            }
        }

        info!("DispatchService stopped");
    }
}
