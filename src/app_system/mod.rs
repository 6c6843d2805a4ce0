//! System orchestration, startup, and shutdown logic.

pub mod health;
pub mod logistics_system;
pub mod tracing;

pub use health::*;
pub use logistics_system::*;
pub use self::tracing::*;
