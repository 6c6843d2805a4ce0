use chrono::Utc;

use super::actions::{BookingAction, BookingActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Booking, BookingCreate, BookingStatus};
use crate::error::LogisticsError;

impl Entity for Booking {
    type Id = String;
    type CreateParams = BookingCreate;
    type Patch = ();
    type Action = BookingAction;
    type ActionResult = BookingActionResult;

    const KIND: &'static str = "Booking";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a PENDING booking from a priced, validated draft.
    fn from_create_params(id: String, params: BookingCreate) -> Result<Self, LogisticsError> {
        if !(params.distance.is_finite() && params.distance >= 0.0) {
            return Err(LogisticsError::Validation(format!(
                "Distance must be non-negative, got {}",
                params.distance
            )));
        }
        if !(params.price.is_finite() && params.price >= 0.0) {
            return Err(LogisticsError::Validation(format!(
                "Price must be non-negative, got {}",
                params.price
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.requester.user_id,
            user_name: params.requester.user_name,
            pickup_location: params.draft.pickup_location,
            drop_location: params.draft.drop_location,
            load_type: params.draft.load_type,
            weight: params.draft.weight,
            distance: params.distance,
            price: params.price,
            status: BookingStatus::Pending,
            assignment: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Bookings are never edited field by field; they only move through actions.
    fn on_update(&mut self, _patch: ()) -> Result<(), LogisticsError> {
        Err(LogisticsError::Conflict(
            "Bookings change only through assignment and status transitions".to_string(),
        ))
    }

    /// Bookings are kept forever once created.
    fn on_delete(&self) -> Result<(), LogisticsError> {
        Err(LogisticsError::Conflict(format!(
            "Booking {} cannot be deleted",
            self.id
        )))
    }

    fn handle_action(&mut self, action: BookingAction) -> Result<BookingActionResult, LogisticsError> {
        match action {
            BookingAction::Assign(assignment) => {
                if self.status != BookingStatus::Pending {
                    return Err(LogisticsError::Conflict(format!(
                        "Booking {} is {}; only PENDING bookings can be assigned",
                        self.id, self.status
                    )));
                }
                self.assignment = Some(assignment);
                self.status = BookingStatus::Assigned;
                self.updated_at = Utc::now();
                Ok(BookingActionResult::Assign(self.clone()))
            }
            BookingAction::Transition(to) => {
                let from = self.status;
                // PENDING -> ASSIGNED needs a truck and driver, so it is only
                // reachable through Assign.
                if to == BookingStatus::Assigned || !from.can_transition_to(to) {
                    return Err(LogisticsError::InvalidTransition { from, to });
                }
                self.status = to;
                self.updated_at = Utc::now();
                Ok(BookingActionResult::Transition {
                    booking: self.clone(),
                    from,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Assignment, BookingDraft, Requester};

    fn pending() -> Booking {
        let params = BookingCreate {
            requester: Requester {
                user_id: "user_1".into(),
                user_name: "Asha".into(),
                email: "asha@example.com".into(),
            },
            draft: BookingDraft::new("A", "B", "Grain", 2.5).validate().unwrap(),
            distance: 40.0,
            price: 151.25,
        };
        Booking::from_create_params("booking_1".into(), params).unwrap()
    }

    fn assignment() -> Assignment {
        Assignment {
            truck_id: "truck_1".into(),
            truck_number: "KA-01-1111".into(),
            driver_id: "driver_1".into(),
            driver_name: "Ravi".into(),
        }
    }

    #[test]
    fn new_bookings_start_pending_and_unassigned() {
        let booking = pending();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.assignment.is_none());
        assert!(booking.is_active());
    }

    #[test]
    fn assign_binds_truck_and_driver_together() {
        let mut booking = pending();
        let result = booking.handle_action(BookingAction::Assign(assignment())).unwrap();
        let assigned = result.into_booking();
        assert_eq!(assigned.status, BookingStatus::Assigned);
        assert_eq!(assigned.truck_id(), Some("truck_1"));
        assert_eq!(assigned.driver_id(), Some("driver_1"));
    }

    #[test]
    fn assign_twice_is_a_conflict() {
        let mut booking = pending();
        booking.handle_action(BookingAction::Assign(assignment())).unwrap();
        let again = booking.handle_action(BookingAction::Assign(assignment()));
        assert!(matches!(again, Err(LogisticsError::Conflict(_))));
    }

    #[test]
    fn status_action_cannot_skip_assignment() {
        let mut booking = pending();
        for to in [BookingStatus::Assigned, BookingStatus::InTransit, BookingStatus::Delivered] {
            let err = booking.handle_action(BookingAction::Transition(to)).unwrap_err();
            assert_eq!(
                err,
                LogisticsError::InvalidTransition { from: BookingStatus::Pending, to }
            );
        }
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn transition_reports_previous_status() {
        let mut booking = pending();
        booking.handle_action(BookingAction::Assign(assignment())).unwrap();
        match booking
            .handle_action(BookingAction::Transition(BookingStatus::InTransit))
            .unwrap()
        {
            BookingActionResult::Transition { booking, from } => {
                assert_eq!(from, BookingStatus::Assigned);
                assert_eq!(booking.status, BookingStatus::InTransit);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn bookings_refuse_patches_and_deletes() {
        let mut booking = pending();
        assert!(booking.on_update(()).is_err());
        assert!(booking.on_delete().is_err());
    }
}
