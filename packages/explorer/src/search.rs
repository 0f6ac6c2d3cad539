//! # Search and sort pipeline
//!
//! [`apply`] is a pure function of its inputs, so whatever the presentation
//! layer shows is simply `apply(current destinations, current query, current
//! sort key)`; there is no cached output that could lag behind the latest
//! input.
//!
//! - **Filter**: case-insensitive substring match on name, description and
//!   each highlight. A blank query keeps everything.
//! - **Sort** (stable):
//!   - [`SortKey::Name`]: ascending, byte-wise lexicographic.
//!   - [`SortKey::Price`]: ascending by the digits of the price string
//!     (`"$1,200"` is 1200); prices without digits go last.
//!   - [`SortKey::Rating`]: descending.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Destination;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Price, SortKey::Rating];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Rating => "rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "price" => Ok(SortKey::Price),
            "rating" => Ok(SortKey::Rating),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Current query and sort selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub sort_key: SortKey,
}

impl SearchState {
    pub fn apply(&self, destinations: &[Destination]) -> Vec<Destination> {
        apply(destinations, &self.query, self.sort_key)
    }
}

/// Filter `destinations` by `query` and sort by `sort_key`.
pub fn apply(destinations: &[Destination], query: &str, sort_key: SortKey) -> Vec<Destination> {
    let needle = query.trim().to_lowercase();
    let mut out: Vec<Destination> = destinations
        .iter()
        .filter(|d| matches(d, &needle))
        .cloned()
        .collect();

    match sort_key {
        SortKey::Name => out.sort_by_cached_key(|d| name_key(&d.name)),
        SortKey::Price => out.sort_by(|a, b| cmp_price(price_value(&a.price), price_value(&b.price))),
        SortKey::Rating => out.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    out
}

/// Case-insensitive, with the raw name breaking ties so the order is total.
fn name_key(name: &str) -> (String, String) {
    (name.to_lowercase(), name.to_string())
}

fn matches(destination: &Destination, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    destination.name.to_lowercase().contains(needle)
        || destination.description.to_lowercase().contains(needle)
        || destination
            .highlights
            .iter()
            .any(|h| h.to_lowercase().contains(needle))
}

/// Numeric value of a display price: its digits, everything else stripped.
pub fn price_value(price: &str) -> Option<u64> {
    let digits: String = price.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn cmp_price(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
