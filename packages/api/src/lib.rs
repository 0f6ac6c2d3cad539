//! # API crate: the travel service's REST contract
//!
//! Everything the explorer client knows about the remote service lives here:
//! the JSON wire models, the HTTP status classification and the
//! [`TravelApi`] trait that the orchestration layer programs against.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Request/response bodies for auth, destinations and bookings |
//! | [`error`] | [`ApiError`], classifying HTTP statuses and transport failures |
//! | [`service`] | The [`TravelApi`] seam (one method per endpoint) |
//! | [`client`] | [`HttpApi`], the `reqwest` implementation |
//!
//! ## Endpoints
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | `POST` | `/auth/login` | no |
//! | `POST` | `/auth/register` | no |
//! | `GET` | `/destinations/` | optional bearer |
//! | `POST` | `/bookings/` (fallback `/bookings/create`) | bearer |
//! | `GET` | `/bookings/` | bearer |
//! | `DELETE` | `/bookings/{id}` | bearer |

pub mod client;
pub mod error;
pub mod models;
pub mod service;

mod de;

pub use client::HttpApi;
pub use error::ApiError;
pub use models::{
    Booking, BookingRequest, LoginRequest, LoginResponse, RawDestination, RegisterRequest,
};
pub use service::TravelApi;
