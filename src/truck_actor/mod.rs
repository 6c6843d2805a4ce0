//! Truck half of the fleet registry, including the availability actions.

mod actions;
mod dtos;
pub mod entity;

pub use actions::*;
pub use dtos::*;
