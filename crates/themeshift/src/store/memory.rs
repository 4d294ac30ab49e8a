//! In-process stores.

use std::collections::HashMap;

use super::{PreferenceStore, StoreError};

/// A [`PreferenceStore`] backed by a `HashMap`.
///
/// Lives only as long as the process. Useful for tests and for embedders
/// that persist preferences through their own mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the store for chaining.
    ///
    /// ```rust
    /// use themeshift::MemoryStore;
    ///
    /// let store = MemoryStore::new().with("theme", "light");
    /// assert_eq!(store.get("theme"), Some("light"));
    /// ```
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Borrows the value under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A [`PreferenceStore`] whose every operation fails.
///
/// Stands in for storage the host has disabled, such as a private browsing
/// session or a read-only profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("storage is disabled".to_string()))
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage is disabled".to_string()))
    }
}
