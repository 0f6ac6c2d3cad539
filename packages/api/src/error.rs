//! Error classification for calls against the travel service.

use thiserror::Error;

/// Failure of a single request against the travel service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401: the token is missing, expired or the credentials were refused.
    #[error("unauthorized")]
    Unauthorized,

    /// 404 on the requested resource.
    #[error("not found")]
    NotFound,

    /// Any other 4xx. `message` is whatever the service explained.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// 5xx.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success HTTP status and its response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            400..=499 => Self::Rejected {
                status,
                message: service_message(status, body),
            },
            _ => Self::Server {
                status,
                message: service_message(status, body),
            },
        }
    }

    /// Whether the failure is on the service or transport side rather than a
    /// mistake in the request: 5xx, timeouts, connection failures and
    /// unreadable payloads.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Server { .. } | Self::Timeout | Self::Network(_) | Self::Decode(_)
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound => Some(404),
            Self::Rejected { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Pull a human readable explanation out of an error body.
///
/// The service answers with `{"message": ...}` or FastAPI-style
/// `{"detail": ...}`; anything else is used verbatim, and an empty body falls
/// back to the canonical reason phrase.
fn service_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "detail"] {
            match value.get(field) {
                Some(serde_json::Value::String(s)) => return s.clone(),
                Some(serde_json::Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown error")
        .to_string()
}
