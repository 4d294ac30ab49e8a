//! Controller configuration.
//!
//! Configuration is plain data with a default for every field, so an empty
//! document is a valid configuration. Files are YAML:
//!
//! ```yaml
//! persist: on_toggle
//! palette:
//!   dark: "#06080B"
//!   light: "#F4F7F9"
//! transition:
//!   fade_in_ms: 400
//!   hold_ms: 100
//!   fade_out_ms: 500
//!   safety_timeout_ms: 3000
//!   fade_in_easing: ease_in_out_cubic
//!   fade_out_easing: ease_out_quad
//! overlay:
//!   z_index: 9999
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::palette::Palette;

/// When the resolved mode is written to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Only a toggle writes. Until the first toggle the store stays empty and
    /// the environment keeps deciding the mode at every start.
    OnToggle,
    /// Start-up also writes the resolved mode, pinning the first resolution.
    #[default]
    OnResolve,
}

/// Timing of the masked transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Overlay fade from transparent to opaque.
    pub fade_in_ms: u64,
    /// Pause at full opacity after the mode has changed, letting the
    /// re-render settle before the overlay starts to fade.
    pub hold_ms: u64,
    /// Overlay fade from opaque back to transparent.
    pub fade_out_ms: u64,
    /// Upper bound on a whole transition. A transition still running after
    /// this long is finished and its overlay released, even without frames.
    pub safety_timeout_ms: u64,
    pub fade_in_easing: Easing,
    pub fade_out_easing: Easing,
}

impl TransitionConfig {
    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn safety_timeout(&self) -> Duration {
        Duration::from_millis(self.safety_timeout_ms)
    }

    /// Length of an undisturbed transition.
    pub fn total(&self) -> Duration {
        self.fade_in() + self.hold() + self.fade_out()
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 400,
            hold_ms: 100,
            fade_out_ms: 500,
            safety_timeout_ms: 3000,
            fade_in_easing: Easing::EaseInOutCubic,
            fade_out_easing: Easing::EaseOutQuad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    pub z_index: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { z_index: 9999 }
    }
}

/// Everything a [`ThemeController`](crate::ThemeController) can be tuned with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub persist: PersistPolicy,
    pub palette: Palette,
    pub transition: TransitionConfig,
    pub overlay: OverlayConfig,
}

/// Error returned when configuration cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ThemeConfig {
    /// Parses and validates a YAML document.
    ///
    /// ```rust
    /// use themeshift::{PersistPolicy, ThemeConfig};
    ///
    /// let config = ThemeConfig::from_yaml("persist: on_toggle\ntransition:\n  hold_ms: 250\n").unwrap();
    /// assert_eq!(config.persist, PersistPolicy::OnToggle);
    /// assert_eq!(config.transition.hold_ms, 250);
    /// assert_eq!(config.transition.fade_in_ms, 400);
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: ThemeConfig = if source.trim().is_empty() {
            ThemeConfig::default()
        } else {
            serde_yaml::from_str(source)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    /// Checks that the safety timeout leaves room for a full transition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let transition = &self.transition;
        if transition.safety_timeout() <= transition.total() {
            return Err(ConfigError::Invalid(format!(
                "transition.safety_timeout_ms ({}) must exceed the transition length ({} ms)",
                transition.safety_timeout_ms,
                transition.total().as_millis()
            )));
        }
        Ok(())
    }
}
