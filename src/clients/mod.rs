//! Typed handles over the store actors and the dispatch actor.

#[macro_use]
mod macros;

pub mod booking_client;
pub mod dispatch_client;
pub mod fleet_client;
pub mod user_client;

pub use booking_client::*;
pub use dispatch_client::*;
pub use fleet_client::*;
pub use user_client::*;

use std::cmp::Ordering;

/// Orders `<prefix>_<n>` ids by their counter, so `truck_10` sorts after
/// `truck_9`.
pub fn by_sequence(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
