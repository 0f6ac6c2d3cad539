//! The seam between the orchestration core and the network.

use std::future::Future;

use crate::error::ApiError;
use crate::models::{
    Booking, BookingRequest, LoginRequest, LoginResponse, RawDestination, RegisterRequest,
};

/// One method per endpoint of the travel service.
///
/// The futures are not required to be `Send`: the client runs on a single
/// cooperative event loop (the browser, or a current-thread runtime).
pub trait TravelApi {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>>;

    fn register(&self, request: &RegisterRequest) -> impl Future<Output = Result<(), ApiError>>;

    /// `token` is attached as a bearer credential when present.
    fn list_destinations(
        &self,
        token: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RawDestination>, ApiError>>;

    fn create_booking(
        &self,
        token: &str,
        request: &BookingRequest,
    ) -> impl Future<Output = Result<Booking, ApiError>>;

    fn list_bookings(&self, token: &str) -> impl Future<Output = Result<Vec<Booking>, ApiError>>;

    fn delete_booking(&self, token: &str, id: &str) -> impl Future<Output = Result<(), ApiError>>;
}
