//! Remembering the chosen mode across restarts.

use tracing::{debug, warn};

use crate::mode::ThemeMode;
use crate::store::PreferenceStore;

/// The key the mode is stored under.
pub const THEME_KEY: &str = "theme";

/// Reads and writes the mode through a [`PreferenceStore`].
///
/// Neither direction can fail from the caller's point of view. The in-memory
/// mode held by the [`ThemeController`](crate::ThemeController) stays
/// authoritative for the running session, so a store that cannot be read
/// behaves like an empty one, and a write that fails is logged and dropped.
#[derive(Debug, Clone)]
pub struct ThemePersistence<S> {
    store: S,
}

impl<S: PreferenceStore> ThemePersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the stored mode.
    ///
    /// `None` if the key is absent, the value is not `"dark"` or `"light"`,
    /// or the store is inaccessible.
    pub fn read(&self) -> Option<ThemeMode> {
        let raw = match self.store.load(THEME_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                debug!(%err, "theme preference unreadable; treating as absent");
                return None;
            }
        };
        let mode = ThemeMode::parse(&raw);
        if mode.is_none() {
            debug!(value = %raw, "ignoring unrecognized theme preference");
        }
        mode
    }

    /// Stores `mode`. Writing the same mode twice is harmless.
    pub fn write(&mut self, mode: ThemeMode) {
        if let Err(err) = self.store.save(THEME_KEY, mode.as_str()) {
            warn!(%err, %mode, "failed to persist theme preference");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
