//! Booking confirmations, sent off the request path.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::domain::{Booking, Requester};
use crate::error::LogisticsResult;

/// Outbound channel for messages to users.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> LogisticsResult<()>;
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> LogisticsResult<()> {
        info!(to, subject, body, "Notification");
        Ok(())
    }
}

pub fn confirmation_message(booking: &Booking) -> (String, String) {
    let subject = format!("Booking {} confirmed", booking.id);
    let body = format!(
        "Hello {},\n\nYour booking from {} to {} ({} tons of {}) was received.\n\
         Distance: {:.2} km\nPrice: {:.2}\nStatus: {}\n",
        booking.user_name,
        booking.pickup_location,
        booking.drop_location,
        booking.weight,
        booking.load_type,
        booking.distance,
        booking.price,
        booking.status,
    );
    (subject, body)
}

/// Fire-and-forget: the booking is already stored, so a failed send is only
/// logged.
#[instrument(skip_all, fields(booking_id = %booking.id))]
pub fn spawn_confirmation(notifier: Arc<dyn Notifier>, requester: &Requester, booking: &Booking) {
    let to = requester.email.clone();
    let booking_id = booking.id.clone();
    let (subject, body) = confirmation_message(booking);

    tokio::spawn(async move {
        match notifier.send(&to, &subject, &body).await {
            Ok(()) => info!(booking_id = %booking_id, "Booking confirmation sent"),
            Err(e) => error!(booking_id = %booking_id, error = %e, "Failed to send booking confirmation"),
        }
    });
}
