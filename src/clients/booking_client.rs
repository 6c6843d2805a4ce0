use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::booking_actor::{BookingAction, BookingActionResult};
use crate::domain::{Assignment, Booking, BookingCreate, BookingDraft, BookingStatus, Requester};
use crate::error::{LogisticsError, LogisticsResult};
use crate::notify::{spawn_confirmation, Notifier};
use crate::pricing::PricingCalculator;

/// Client for interacting with the Booking actor.
///
/// Creation is orchestrated here rather than in an actor: it validates the
/// draft, prices it (which may wait on the distance service) and only then
/// stores it, so a slow lookup never holds up other stores.
#[derive(Clone)]
pub struct BookingClient {
    inner: ResourceClient<Booking>,
    pricing: Arc<PricingCalculator>,
    notifier: Arc<dyn Notifier>,
}

impl_client_methods!(BookingClient, inner, Booking, booking);

impl BookingClient {
    pub fn new(
        inner: ResourceClient<Booking>,
        pricing: Arc<PricingCalculator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner,
            pricing,
            notifier,
        }
    }

    #[instrument(skip(self, requester, draft), fields(user_id = %requester.user_id))]
    pub async fn create_booking(&self, requester: Requester, draft: BookingDraft) -> LogisticsResult<Booking> {
        info!("Processing create_booking request (Client Side)");

        // Step 1: Validate before touching the distance service
        let draft = draft.validate().map_err(|e| {
            warn!(error = %e, "Booking draft rejected");
            e
        })?;

        // Step 2: Price
        let quote = self
            .pricing
            .quote(&draft.pickup_location, &draft.drop_location, draft.weight)
            .await?;

        // Step 3: Persist in PENDING
        let payload = BookingCreate {
            requester: requester.clone(),
            draft,
            distance: quote.distance_km,
            price: quote.price,
        };
        let booking = self.inner.create(payload).await?;
        info!(booking_id = %booking.id, price = booking.price, "Booking created");

        // Step 4: Confirm in the background
        spawn_confirmation(self.notifier.clone(), &requester, &booking);

        Ok(booking)
    }

    /// Every booking, newest first.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> LogisticsResult<Vec<Booking>> {
        debug!("Sending request");
        let mut bookings = self.inner.list().await?;
        newest_first(&mut bookings);
        Ok(bookings)
    }

    /// The requester's bookings, newest first.
    #[instrument(skip(self))]
    pub async fn list_by_requester(&self, user_id: &str) -> LogisticsResult<Vec<Booking>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect())
    }

    /// Bookings still holding a truck or driver.
    pub async fn list_active(&self) -> LogisticsResult<Vec<Booking>> {
        Ok(self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(Booking::is_active)
            .collect())
    }

    #[instrument(skip(self, assignment), fields(truck_id = %assignment.truck_id, driver_id = %assignment.driver_id))]
    pub async fn assign(&self, id: String, assignment: Assignment) -> LogisticsResult<Booking> {
        debug!("Sending request");
        self.inner
            .perform_action(id, BookingAction::Assign(assignment))
            .await
            .map(BookingActionResult::into_booking)
    }

    /// Moves the booking along one edge; returns it with the state it left.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: String, to: BookingStatus) -> LogisticsResult<(Booking, BookingStatus)> {
        debug!("Sending request");
        match self.inner.perform_action(id, BookingAction::Transition(to)).await? {
            BookingActionResult::Transition { booking, from } => Ok((booking, from)),
            BookingActionResult::Assign(booking) => Err(LogisticsError::ActorCommunication(format!(
                "Booking {} answered a transition with an assignment",
                booking.id
            ))),
        }
    }
}

fn newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| crate::clients::by_sequence(&b.id, &a.id))
    });
}
