use serde::Serialize;

use super::{Booking, BookingStatus};

/// Totals shown on the administrator dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_bookings: usize,
    /// Sum of prices over delivered bookings.
    pub total_revenue: f64,
    pub pending_bookings: usize,
    pub completed_bookings: usize,
}

impl DashboardStats {
    pub fn compute(total_users: usize, bookings: &[Booking]) -> Self {
        let delivered = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Delivered);

        let total_revenue = delivered.clone().map(|b| b.price).sum::<f64>();

        Self {
            total_users,
            total_bookings: bookings.len(),
            total_revenue: (total_revenue * 100.0).round() / 100.0,
            pending_bookings: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
            completed_bookings: delivered.count(),
        }
    }
}
