//! Booking store: creation and the per-record half of the lifecycle.

mod actions;
pub mod entity;

pub use actions::*;
