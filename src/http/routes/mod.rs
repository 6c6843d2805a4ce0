pub mod admin;
pub mod auth;
pub mod bookings;
pub mod health;

#[cfg(test)]
mod tests;
