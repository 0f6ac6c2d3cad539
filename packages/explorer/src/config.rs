//! # Client configuration: `explorer.toml`
//!
//! ```toml
//! [api]
//! base_url = "https://travel-app-a9mw.onrender.com"
//! catalog_timeout_secs = 10
//!
//! [booking]
//! auto_close_secs = 2
//! ```
//!
//! Every section and field is optional; missing values take the defaults
//! shown above. Native hosts can override them through `EXPLORER_API_BASE`,
//! `EXPLORER_CATALOG_TIMEOUT_SECS` and `EXPLORER_AUTO_CLOSE_SECS` (a `.env`
//! file is honoured).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

/// Remote service settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound on a destinations fetch before degraded mode kicks in.
    #[serde(default = "default_catalog_timeout")]
    pub catalog_timeout_secs: u64,
}

/// Booking modal behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How long a confirmation stays on screen before the modal closes.
    #[serde(default = "default_auto_close")]
    pub auto_close_secs: u64,
}

fn default_base_url() -> String {
    "https://travel-app-a9mw.onrender.com".to_string()
}

fn default_catalog_timeout() -> u64 {
    10
}

fn default_auto_close() -> u64 {
    2
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_timeout_secs: default_catalog_timeout(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            auto_close_secs: default_auto_close(),
        }
    }
}

impl ExplorerConfig {
    /// Create a config pointing at the given service.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            booking: BookingConfig::default(),
        }
    }

    pub fn with_catalog_timeout(mut self, secs: u64) -> Self {
        self.api.catalog_timeout_secs = secs;
        self
    }

    pub fn with_auto_close(mut self, secs: u64) -> Self {
        self.booking.auto_close_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "explorer.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.api.catalog_timeout_secs)
    }

    pub fn auto_close_delay(&self) -> Duration {
        Duration::from_secs(self.booking.auto_close_secs)
    }

    /// Apply `EXPLORER_*` environment overrides on top of `self`.
    ///
    /// Unparseable numbers are ignored with a warning.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_env_overrides(self) -> Self {
        dotenvy::dotenv().ok();
        self.with_overrides(|key| std::env::var(key).ok())
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup("EXPLORER_API_BASE") {
            self.api.base_url = base_url;
        }
        if let Some(secs) = parse_secs(&lookup, "EXPLORER_CATALOG_TIMEOUT_SECS") {
            self.api.catalog_timeout_secs = secs;
        }
        if let Some(secs) = parse_secs(&lookup, "EXPLORER_AUTO_CLOSE_SECS") {
            self.booking.auto_close_secs = secs;
        }
        self
    }
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring invalid override");
            None
        }
    }
}
