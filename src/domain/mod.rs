pub mod booking;
pub mod dashboard;
pub mod driver;
pub mod status;
pub mod truck;
pub mod user;

pub use booking::*;
pub use dashboard::*;
pub use driver::*;
pub use status::*;
pub use truck::*;
pub use user::*;
