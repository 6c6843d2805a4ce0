//! Accounts, password hashing and bearer tokens.

mod password;
mod session;
mod token;

pub use password::*;
pub use session::*;
pub use token::*;
