use serde::{Deserialize, Serialize};

/// A destination exactly as `GET /destinations/` returns it.
///
/// Only `name` and the coordinates are guaranteed. The display fields
/// (`price`, `rating`, `duration`, `image`) are frequently omitted and are
/// filled in client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDestination {
    #[serde(default, deserialize_with = "crate::de::opt_text")]
    pub id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub description: Option<String>,
    /// Display price such as `"$1,200"`; numbers are accepted and stringified.
    #[serde(default, deserialize_with = "crate::de::opt_text")]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Display duration such as `"7 days"`; numbers are accepted and stringified.
    #[serde(default, deserialize_with = "crate::de::opt_text")]
    pub duration: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl RawDestination {
    /// Minimal record with just a name and coordinates.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            lat,
            lng,
            description: None,
            price: None,
            rating: None,
            duration: None,
            highlights: Vec::new(),
            image: None,
        }
    }
}
