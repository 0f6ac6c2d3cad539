//! # Bookings: submission, listing and cancellation
//!
//! | Type | Role |
//! |------|------|
//! | [`BookingService`] | stateless calls: `submit`, `list`, `cancel` |
//! | [`BookingRequestState`] | per-submission state machine (`idle → submitting → confirmed \| failed`) |
//! | [`BookingModal`] | one booking form: serialises submits, keeps the draft on failure, auto-closes after confirmation |
//! | [`BookingsLedger`] | the "my bookings" list: re-fetched on every open, optimistic cancel |
//!
//! Invalid drafts are rejected before any request is made. List failures are
//! surfaced as errors and never replaced by made-up data.

mod ledger;
mod modal;
mod state;

pub use ledger::BookingsLedger;
pub use modal::BookingModal;
pub use state::{BookingEvent, BookingRequestState};

use api::{ApiError, Booking, BookingRequest, TravelApi};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    /// Missing or expired token.
    #[error("session expired, please log in again")]
    Unauthorized,

    #[error("could not reach the travel service: {0}")]
    Network(String),

    /// A submission from the same form is still in flight.
    #[error("booking is already being submitted")]
    InFlight,

    #[error("booking already confirmed")]
    AlreadyConfirmed,
}

impl From<ApiError> for BookingError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unauthorized => Self::Unauthorized,
            ApiError::Rejected { message, .. } => Self::Validation(message),
            other => Self::Network(other.to_string()),
        }
    }
}

/// Fields of a booking that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub destination: String,
    pub customer_name: String,
    pub days: u32,
    /// ISO date, `YYYY-MM-DD`.
    pub travel_date: String,
    pub travelers: u32,
    pub special_requests: String,
}

impl BookingDraft {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            customer_name: String::new(),
            days: 1,
            travel_date: String::new(),
            travelers: 1,
            special_requests: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        if self.destination.trim().is_empty() {
            return Err(BookingError::Validation("destination is required".into()));
        }
        if self.customer_name.trim().is_empty() {
            return Err(BookingError::Validation("customer name is required".into()));
        }
        let date = self.travel_date.trim();
        if date.is_empty() {
            return Err(BookingError::Validation("travel date is required".into()));
        }
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(BookingError::Validation(format!(
                "travel date must be YYYY-MM-DD, got {date:?}"
            )));
        }
        if self.days < 1 {
            return Err(BookingError::Validation("days must be at least 1".into()));
        }
        if self.travelers < 1 {
            return Err(BookingError::Validation("travelers must be at least 1".into()));
        }
        Ok(())
    }

    fn to_request(&self) -> BookingRequest {
        BookingRequest {
            destination: self.destination.trim().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            days: self.days,
            travel_date: self.travel_date.trim().to_string(),
            travelers: self.travelers,
            special_requests: self.special_requests.trim().to_string(),
        }
    }
}

/// What a cancel achieved. Both mean the booking is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// The service no longer knew the booking.
    AlreadyGone,
}

#[derive(Debug, Clone)]
pub struct BookingService<A> {
    api: A,
}

impl<A: TravelApi> BookingService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn submit(
        &self,
        draft: &BookingDraft,
        token: Option<&str>,
    ) -> Result<Booking, BookingError> {
        draft.validate()?;
        let token = token.ok_or(BookingError::Unauthorized)?;

        let booking = self.api.create_booking(token, &draft.to_request()).await?;
        info!(id = %booking.id, destination = %booking.destination, "booking confirmed");
        Ok(booking)
    }

    pub async fn list(&self, token: Option<&str>) -> Result<Vec<Booking>, BookingError> {
        let token = token.ok_or(BookingError::Unauthorized)?;
        let bookings = self.api.list_bookings(token).await?;
        debug!(count = bookings.len(), "bookings loaded");
        Ok(bookings)
    }

    /// Cancel a booking. An unknown id is not an error.
    pub async fn cancel(&self, id: &str, token: Option<&str>) -> Result<CancelOutcome, BookingError> {
        let token = token.ok_or(BookingError::Unauthorized)?;
        match self.api.delete_booking(token, id).await {
            Ok(()) => {
                info!(id, "booking cancelled");
                Ok(CancelOutcome::Cancelled)
            }
            Err(ApiError::NotFound) => {
                debug!(id, "booking already gone");
                Ok(CancelOutcome::AlreadyGone)
            }
            Err(e) => Err(e.into()),
        }
    }
}
