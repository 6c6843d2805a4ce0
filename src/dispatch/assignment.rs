use tracing::{error, info, instrument, warn};

use super::DispatchService;
use crate::domain::{Assignment, Booking, BookingStatus};
use crate::error::{LogisticsError, LogisticsResult};

impl DispatchService {
    /// Binds a PENDING booking to a truck and a driver.
    ///
    /// Preconditions are checked in a fixed order and nothing is written until
    /// all of them hold. The truck is reserved first; if the booking then
    /// refuses the assignment the reservation is released again.
    #[instrument(
        fields(booking_id = %booking_id, truck_id = %truck_id, driver_id = %driver_id),
        skip(self)
    )]
    pub(super) async fn assign_booking(
        &self,
        booking_id: String,
        truck_id: String,
        driver_id: String,
    ) -> LogisticsResult<Booking> {
        info!("Processing assign request");

        // Step 1: booking exists and is still open
        let booking = self.bookings.fetch_booking(booking_id.clone()).await?;
        if booking.status != BookingStatus::Pending {
            warn!(status = %booking.status, "Booking is not pending");
            return Err(LogisticsError::Conflict(format!(
                "Booking {} is {}; only PENDING bookings can be assigned",
                booking.id, booking.status
            )));
        }

        // Step 2: truck and driver exist
        let truck = self.fleet.fetch_truck(truck_id.clone()).await?;
        let driver = self.fleet.fetch_driver(driver_id.clone()).await?;

        // Step 3: truck can take the load
        if !truck.is_available() {
            warn!(availability = %truck.availability_status, "Truck not available");
            return Err(LogisticsError::Unavailable(format!(
                "Truck {} is {}",
                truck.truck_number, truck.availability_status
            )));
        }
        if !truck.can_carry(booking.weight) {
            warn!(capacity = truck.capacity, weight = booking.weight, "Truck too small");
            return Err(LogisticsError::Unavailable(format!(
                "Truck {} carries {} tons, load is {} tons",
                truck.truck_number, truck.capacity, booking.weight
            )));
        }

        // Step 4: reserve, then bind
        self.fleet.reserve_truck(truck_id.clone(), booking.weight).await?;

        let assignment = Assignment {
            truck_id: truck.id.clone(),
            truck_number: truck.truck_number.clone(),
            driver_id: driver.id.clone(),
            driver_name: driver.name.clone(),
        };

        match self.bookings.assign(booking_id, assignment).await {
            Ok(assigned) => {
                info!("Booking assigned");
                Ok(assigned)
            }
            Err(e) => {
                error!(error = %e, "Assignment failed after reserving truck; releasing");
                if let Err(rollback) = self.fleet.release_truck(truck_id).await {
                    error!(error = %rollback, "Failed to release truck after aborted assignment");
                }
                Err(e)
            }
        }
    }
}
