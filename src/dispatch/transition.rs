use tracing::{error, info, instrument, warn};

use super::DispatchService;
use crate::domain::{Booking, BookingStatus, TruckAvailability};
use crate::error::{LogisticsError, LogisticsResult};

impl DispatchService {
    /// Moves a booking along one edge of the lifecycle.
    ///
    /// Entering DELIVERED or CANCELLED frees the bound truck. The release is
    /// verified before the booking moves, so the truck is released exactly
    /// once and never for a booking that stayed put.
    #[instrument(fields(booking_id = %booking_id, to = %to), skip(self))]
    pub(super) async fn update_status(&self, booking_id: String, to: BookingStatus) -> LogisticsResult<Booking> {
        info!("Processing status update");

        let booking = self.bookings.fetch_booking(booking_id.clone()).await?;
        let from = booking.status;
        if to == BookingStatus::Assigned || !from.can_transition_to(to) {
            warn!(%from, "Illegal transition requested");
            return Err(LogisticsError::InvalidTransition { from, to });
        }

        let releasing = if to.releases_truck() {
            booking.truck_id().map(str::to_string)
        } else {
            None
        };

        if let Some(truck_id) = &releasing {
            let truck = self.fleet.fetch_truck(truck_id.clone()).await?;
            if truck.availability_status != TruckAvailability::Assigned {
                error!(truck_id = %truck_id, availability = %truck.availability_status, "Bound truck is not assigned");
                return Err(LogisticsError::Conflict(format!(
                    "Truck {} is {}, expected ASSIGNED",
                    truck.truck_number, truck.availability_status
                )));
            }
        }

        let (updated, _) = self.bookings.transition(booking_id, to).await?;

        if let Some(truck_id) = releasing {
            self.fleet.release_truck(truck_id.clone()).await.map_err(|e| {
                error!(truck_id = %truck_id, error = %e, "Booking closed but truck release failed");
                e
            })?;
            info!(truck_id = %truck_id, "Truck released");
        }

        info!(%from, "Status updated");
        Ok(updated)
    }
}
