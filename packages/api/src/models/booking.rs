use serde::{Deserialize, Serialize};

/// Body of `POST /bookings/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub destination: String,
    pub customer_name: String,
    pub days: u32,
    pub travel_date: String,
    pub travelers: u32,
    pub special_requests: String,
}

/// A booking owned by the service.
///
/// Older service revisions only return `id`, `destination`, `customer_name`
/// and `days`; the rest default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(deserialize_with = "crate::de::text")]
    pub id: String,
    pub destination: String,
    pub customer_name: String,
    #[serde(default = "one")]
    pub days: u32,
    #[serde(default)]
    pub travel_date: Option<String>,
    #[serde(default = "one")]
    pub travelers: u32,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn one() -> u32 {
    1
}
