pub mod admin;
pub mod attractions;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod profile;
pub mod session;
