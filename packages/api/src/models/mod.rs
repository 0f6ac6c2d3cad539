//! Wire models exchanged with the travel service.

mod auth;
mod booking;
mod destination;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use booking::{Booking, BookingRequest};
pub use destination::RawDestination;
