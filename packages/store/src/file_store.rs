//! # Filesystem-backed session store
//!
//! [`FileStore`] persists each key as its own file so desktop and mobile hosts
//! keep the session across restarts.
//!
//! ```text
//! <base_dir>/
//! ├── token
//! ├── darkMode
//! └── user
//! ```
//!
//! Key names are sanitised to `[A-Za-z0-9_-]`; anything else becomes `_`.
//! I/O failures are logged and treated as absence, matching the contract that
//! storage never raises.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::SessionStore;

/// Filesystem-backed SessionStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store under the platform data directory (`<data_dir>/travel-explorer`),
    /// falling back to the working directory when none is known.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("travel-explorer");
        Self::new(base)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base.join(name)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            warn!(key, error = %e, "failed to create session store directory");
            return;
        }
        if let Err(e) = std::fs::write(self.key_path(key), value) {
            warn!(key, error = %e, "failed to persist session value");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(key, error = %e, "failed to remove session value"),
        }
    }
}
