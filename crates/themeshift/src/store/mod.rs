//! Durable key-value storage for preferences.
//!
//! This module provides:
//!
//! - [`PreferenceStore`]: The storage capability the persistence layer writes through
//! - [`MemoryStore`]: An in-process map
//! - [`FileStore`]: A JSON object file, the durable per-profile store
//! - [`UnavailableStore`]: A store that always fails, modelling disabled storage
//!
//! Stores deal in raw strings. Interpreting the values (and deciding that a
//! failure is harmless) is the job of [`ThemePersistence`](crate::ThemePersistence).

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::{MemoryStore, UnavailableStore};

/// String key-value storage.
pub trait PreferenceStore {
    /// Reads the value stored under `key`, or `None` if the key is absent.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}
