//! Display preferences that survive reloads.

use store::{keys, SessionStore};

/// Reads and writes the persisted `darkMode` flag (a JSON boolean).
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
}

impl<S: SessionStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Defaults to light mode when unset or unreadable.
    pub fn dark_mode(&self) -> bool {
        self.store
            .get(keys::DARK_MODE)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(false)
    }

    pub fn set_dark_mode(&self, enabled: bool) {
        self.store
            .set(keys::DARK_MODE, if enabled { "true" } else { "false" });
    }

    /// Flip the flag and return the new value.
    pub fn toggle_dark_mode(&self) -> bool {
        let enabled = !self.dark_mode();
        self.set_dark_mode(enabled);
        enabled
    }
}
