//! The environment's light/dark appearance signal.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

/// Reports whether the environment prefers a light appearance.
///
/// `None` means the signal is unavailable (headless process, unsupported
/// platform). Resolution treats that exactly like "no preference".
pub trait AmbientSignal {
    fn prefers_light(&self) -> Option<bool>;
}

impl<F> AmbientSignal for F
where
    F: Fn() -> Option<bool>,
{
    fn prefers_light(&self) -> Option<bool> {
        self()
    }
}

/// Queries the operating system's appearance setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsAmbient;

impl AmbientSignal for OsAmbient {
    fn prefers_light(&self) -> Option<bool> {
        match detect_os_theme() {
            OsThemeMode::Dark => Some(false),
            OsThemeMode::Light => Some(true),
        }
    }
}

/// A constant signal, for tests and for hosts that must not consult the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedAmbient(pub Option<bool>);

impl FixedAmbient {
    pub fn light() -> Self {
        Self(Some(true))
    }

    pub fn dark() -> Self {
        Self(Some(false))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl AmbientSignal for FixedAmbient {
    fn prefers_light(&self) -> Option<bool> {
        self.0
    }
}
