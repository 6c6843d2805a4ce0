use crate::domain::{Assignment, Booking, BookingStatus};

/// Custom actions for Booking entities.
///
/// Each one checks the booking's current status and either applies the whole
/// change or rejects it, so the dispatcher can rely on them as compare-and-set
/// steps.
#[derive(Debug, Clone)]
pub enum BookingAction {
    /// Binds a truck and driver. Only valid while PENDING.
    Assign(Assignment),
    /// Moves along a lifecycle edge other than PENDING -> ASSIGNED.
    Transition(BookingStatus),
}

/// Results from BookingActions - variants match 1:1 with BookingAction
#[derive(Debug, Clone)]
pub enum BookingActionResult {
    Assign(Booking),
    Transition { booking: Booking, from: BookingStatus },
}

impl BookingActionResult {
    pub fn into_booking(self) -> Booking {
        match self {
            BookingActionResult::Assign(booking) => booking,
            BookingActionResult::Transition { booking, .. } => booking,
        }
    }
}
