//! # Browser `localStorage` session store
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the web platform. It
//! writes straight into `window.localStorage`, which is synchronous and
//! survives page reloads within the same origin.
//!
//! Errors (no window, storage disabled, quota exceeded) never reach the
//! caller: reads return `None`, and rejected writes and removals are logged. The client degrades to an anonymous
//! session instead of failing.

use tracing::warn;

use crate::SessionStore;

/// `localStorage`-backed SessionStore for the web platform.
///
/// An optional namespace prefixes every key (`"<namespace>:<key>"`) so several
/// clients can share one origin without clobbering each other.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    prefix: Option<String>,
}

impl LocalStorageStore {
    /// Unprefixed store, reading the same keys as the legacy web client.
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    pub fn with_namespace(namespace: Option<&str>) -> Self {
        Self {
            prefix: namespace.map(|ns| format!("{ns}:")),
        }
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{key}"),
            None => key.to_string(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(&self.full_key(key)).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.set_item(&self.full_key(key), value).is_err() {
            warn!(key, "localStorage rejected write");
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.remove_item(&self.full_key(key)).is_err() {
            warn!(key, "localStorage rejected removal");
        }
    }
}
