//! # Session store: durable key/value state that survives reloads
//!
//! The explorer client keeps exactly three values across restarts: the auth
//! token, the dark-mode preference and the cached user identity (see [`keys`]).
//! Everything reads and writes them through the [`SessionStore`] trait so the
//! backend can be swapped per platform:
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`MemoryStore`] | tests and hosts without persistence |
//! | [`FileStore`] | desktop / mobile, one file per key |
//! | `LocalStorageStore` | browser `localStorage` (`web` feature on wasm32) |
//!
//! Absence is a normal result, never an error. Writes are visible to every
//! reader of the same store instance; there is no cross-tab or cross-process
//! synchronisation.

pub mod keys;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

/// Synchronous key/value storage for session state.
pub trait SessionStore {
    /// Read a value. `None` when the key was never written or was removed.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
