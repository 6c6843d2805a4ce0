//! Driver half of the fleet registry.

mod dtos;
pub mod entity;

pub use dtos::*;
