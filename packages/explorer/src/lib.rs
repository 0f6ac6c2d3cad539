//! # Explorer: client-side orchestration for the travel app
//!
//! The presentation layer (web, desktop or mobile) renders; this crate decides
//! what there is to render. It keeps the session, loads destinations with a
//! degraded-mode fallback, filters and sorts them, submits and cancels
//! bookings, and tells the map where to look.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`AuthSession`]: login, registration, logout, restore from storage |
//! | [`catalog`] | [`DestinationCatalog`]: fetch, enrichment, reference fallback set |
//! | [`search`] | [`search::apply`]: pure filter + sort |
//! | [`booking`] | [`BookingService`], [`BookingModal`], [`BookingsLedger`] |
//! | [`map`] | [`MapSync`]: the current focus coordinate |
//! | [`preferences`] | persisted dark mode flag |
//! | [`app`] | [`AppOrchestrator`]: composes the above, drops stale results |
//! | [`config`] | [`ExplorerConfig`]: `explorer.toml` + environment overrides |
//!
//! Everything runs on one cooperative event loop. Shared state lives in
//! `Cell`/`RefCell` and no borrow is held across an `.await`.

pub mod app;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod map;
pub mod preferences;
pub mod search;
pub mod time;

#[cfg(test)]
mod testing;

pub use app::{AppOrchestrator, CatalogView, FetchOutcome};
pub use auth::{AuthError, AuthSession, Session, UserProfile};
pub use booking::{
    BookingDraft, BookingError, BookingModal, BookingRequestState, BookingService, BookingsLedger,
    CancelOutcome,
};
pub use catalog::{CatalogError, CatalogMode, Destination, DestinationCatalog, DestinationList};
pub use config::ExplorerConfig;
pub use map::{Coordinate, MapSync, Marker, Viewport};
pub use preferences::Preferences;
pub use search::{SearchState, SortKey};
