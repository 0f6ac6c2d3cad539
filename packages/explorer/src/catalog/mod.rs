//! # Destination catalog: live fetch with a degraded-mode fallback
//!
//! [`DestinationCatalog::fetch`] issues one `GET /destinations/` bounded by the
//! configured timeout and classifies the outcome:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | 2xx | every record enriched ([`enrich`]), [`CatalogMode::Live`] |
//! | timeout, 5xx, connection failure, unreadable body | built-in reference set ([`fallback`]), [`CatalogMode::Degraded`] with an advisory |
//! | 401 | [`CatalogError::Unauthorized`] for the re-authentication prompt |
//! | other 4xx | [`CatalogError::Client`], a hard failure offering a retry |
//!
//! A fetch never yields a partially enriched collection.

pub mod enrich;
pub mod fallback;

use std::time::Duration;

use api::{ApiError, TravelApi};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::time::with_timeout;

/// A destination ready for display. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    /// Display price, e.g. `"$1,200"`.
    pub price: String,
    pub rating: f64,
    /// Display duration, e.g. `"7 days"`.
    pub duration: String,
    pub highlights: Vec<String>,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMode {
    Live,
    /// Live data unavailable; the reference set is being shown.
    Degraded,
}

/// Outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationList {
    pub destinations: Vec<Destination>,
    pub mode: CatalogMode,
}

impl DestinationList {
    pub const DEGRADED_ADVISORY: &'static str =
        "Operating in offline/demo mode: showing sample destinations.";

    pub fn live(destinations: Vec<Destination>) -> Self {
        Self {
            destinations,
            mode: CatalogMode::Live,
        }
    }

    pub fn degraded() -> Self {
        Self {
            destinations: fallback::reference_destinations(),
            mode: CatalogMode::Degraded,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.mode == CatalogMode::Degraded
    }

    /// Non-fatal notice to show alongside the list.
    pub fn advisory(&self) -> Option<&'static str> {
        self.is_degraded().then_some(Self::DEGRADED_ADVISORY)
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("session expired, please log in again")]
    Unauthorized,

    #[error("could not load destinations ({status}): {message}")]
    Client { status: u16, message: String },
}

/// Fetches and enriches destinations.
#[derive(Debug, Clone)]
pub struct DestinationCatalog<A> {
    api: A,
    timeout: Duration,
}

impl<A: TravelApi> DestinationCatalog<A> {
    pub fn new(api: A, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    pub async fn fetch(&self, token: Option<&str>) -> Result<DestinationList, CatalogError> {
        debug!(authenticated = token.is_some(), "fetching destinations");
        let result = match with_timeout(self.timeout, self.api.list_destinations(token)).await {
            Some(result) => result,
            None => Err(ApiError::Timeout),
        };

        match result {
            Ok(raw) => {
                let destinations = enrich::enrich_all(raw);
                info!(count = destinations.len(), "destinations loaded");
                Ok(DestinationList::live(destinations))
            }
            Err(ApiError::Unauthorized) => Err(CatalogError::Unauthorized),
            Err(e) if e.is_transient() => {
                warn!(error = %e, "destinations unavailable, serving reference set");
                Ok(DestinationList::degraded())
            }
            Err(e) => Err(CatalogError::Client {
                status: e.status().unwrap_or(400),
                message: e.to_string(),
            }),
        }
    }
}
