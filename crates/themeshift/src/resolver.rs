//! Initial mode resolution.

use crate::ambient::AmbientSignal;
use crate::mode::ThemeMode;
use crate::persistence::ThemePersistence;
use crate::store::PreferenceStore;

/// Decides the initial mode from its two inputs.
///
/// | stored     | prefers light | result  |
/// |------------|---------------|---------|
/// | `Some(m)`  | any           | `m`     |
/// | `None`     | `Some(true)`  | `Light` |
/// | `None`     | `Some(false)` | `Dark`  |
/// | `None`     | `None`        | `Dark`  |
///
/// ```rust
/// use themeshift::{resolve, ThemeMode};
///
/// assert_eq!(resolve(Some(ThemeMode::Light), Some(false)), ThemeMode::Light);
/// assert_eq!(resolve(None, Some(true)), ThemeMode::Light);
/// assert_eq!(resolve(None, None), ThemeMode::Dark);
/// ```
pub fn resolve(stored: Option<ThemeMode>, prefers_light: Option<bool>) -> ThemeMode {
    match (stored, prefers_light) {
        (Some(mode), _) => mode,
        (None, Some(true)) => ThemeMode::Light,
        (None, _) => ThemeMode::default(),
    }
}

/// Computes the initial mode once per application start.
pub struct ThemeResolver;

impl ThemeResolver {
    /// Looks up the stored preference and the ambient signal and resolves them.
    ///
    /// The ambient signal is only consulted when nothing is stored.
    pub fn resolve_initial<S, A>(persistence: &ThemePersistence<S>, ambient: &A) -> ThemeMode
    where
        S: PreferenceStore,
        A: AmbientSignal + ?Sized,
    {
        Self::resolve_stored(persistence.read(), ambient)
    }

    /// Resolves an already-read stored preference against the ambient signal.
    pub fn resolve_stored<A>(stored: Option<ThemeMode>, ambient: &A) -> ThemeMode
    where
        A: AmbientSignal + ?Sized,
    {
        match stored {
            Some(mode) => mode,
            None => resolve(None, ambient.prefers_light()),
        }
    }
}
