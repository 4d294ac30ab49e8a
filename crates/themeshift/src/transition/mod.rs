//! The masked theme transition.
//!
//! A toggle runs through four states:
//!
//! ```text
//! Idle ──toggle──▶ FadingIn ──opaque──▶ Committed ──hold──▶ FadingOut ──clear──▶ Idle
//! ```
//!
//! The mode flips on entry to `Committed`, which can only happen once the
//! overlay is fully opaque. Nothing of the swap is ever visible.

mod controller;
mod state;
mod subscribers;

pub use controller::ThemeController;
pub use state::{Toggle, TransitionState};
pub use subscribers::SubscriptionId;
