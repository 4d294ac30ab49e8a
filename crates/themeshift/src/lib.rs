//! # Themeshift - Dark/Light Theme State and Transitions
//!
//! Themeshift owns the single appearance setting of an application: whether
//! it renders dark or light. It decides the initial mode, remembers the
//! user's choice across restarts, and switches modes behind an animated
//! overlay so the swap is never visible half-done.
//!
//! ## Core Concepts
//!
//! - [`ThemeMode`]: The two-valued appearance setting
//! - [`ThemeResolver`]: Picks the initial mode from the stored preference or the environment
//! - [`ThemePersistence`]: Reads and writes the `"theme"` key of a [`PreferenceStore`]
//! - [`ThemeController`]: Owns the mode and runs the masked transition on [`toggle`](ThemeController::toggle)
//! - [`OverlayHost`]: The host's ability to show a full-screen masking layer
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Instant;
//! use themeshift::{FixedAmbient, MemoryStore, NoOverlay, ThemeConfig, ThemeController, ThemeMode, Toggle};
//!
//! let mut controller = ThemeController::init(
//!     ThemeConfig::default(),
//!     MemoryStore::new(),
//!     &FixedAmbient::unavailable(),
//!     NoOverlay,
//! );
//! assert_eq!(controller.mode(), ThemeMode::Dark);
//!
//! // Without an overlay the switch happens immediately.
//! assert_eq!(controller.toggle(Instant::now()), Toggle::Immediate);
//! assert!(!controller.is_dark());
//! ```
//!
//! ## Driving a Transition
//!
//! The controller never sleeps. Hosts call [`ThemeController::advance`] from
//! their frame scheduler with the frame timestamp. The mode flips only once the
//! overlay is fully opaque, and the overlay is released once it has faded out.
//! Hosts that can lose frames (a backgrounded window) should also arm a timer
//! for [`ThemeController::deadline`] and call [`ThemeController::expire`], which
//! finishes any transition that outlived its safety timeout.

mod ambient;
mod config;
mod easing;
mod mode;
mod overlay;
mod palette;
mod persistence;
mod resolver;
pub mod store;
mod transition;

pub use ambient::{AmbientSignal, FixedAmbient, OsAmbient};
pub use config::{ConfigError, OverlayConfig, PersistPolicy, ThemeConfig, TransitionConfig};
pub use easing::Easing;
pub use mode::ThemeMode;
pub use overlay::{NoOverlay, OverlayError, OverlayHost, OverlaySpec, OverlaySurface};
pub use palette::{rgb_to_ansi256, Palette, ParseColorError, Rgb};
pub use persistence::{ThemePersistence, THEME_KEY};
pub use resolver::{resolve, ThemeResolver};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError, UnavailableStore};
pub use transition::{SubscriptionId, ThemeController, Toggle, TransitionState};
