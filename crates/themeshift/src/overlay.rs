//! The masking layer shown while the mode changes.

use crate::palette::Rgb;

/// What the host should create for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySpec {
    /// Background of the mode being switched to.
    pub background: Rgb,
    /// Stacking order; the overlay must sit above all content.
    pub z_index: i32,
    /// Pointer and keyboard input pass through to the content underneath.
    pub input_transparent: bool,
}

/// A live overlay covering the whole viewport.
///
/// The overlay is removed when the value is dropped. Hosts must implement
/// `Drop` (or own a type that does) so that releasing the handle frees the
/// underlying element.
pub trait OverlaySurface {
    /// Sets the opacity, `0.0` (invisible) to `1.0` (fully opaque).
    fn set_opacity(&mut self, opacity: f32);
}

/// A host able to create overlays.
pub trait OverlayHost {
    type Surface: OverlaySurface;

    /// Creates an overlay at opacity zero.
    fn create_overlay(&mut self, spec: &OverlaySpec) -> Result<Self::Surface, OverlayError>;
}

/// Error returned when a host cannot create an overlay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error("overlays are not supported by this host")]
    Unsupported,
    #[error("overlay creation failed: {0}")]
    Host(String),
}

/// A host without overlays. Every toggle switches modes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlay;

impl OverlayHost for NoOverlay {
    type Surface = std::convert::Infallible;

    fn create_overlay(&mut self, _spec: &OverlaySpec) -> Result<Self::Surface, OverlayError> {
        Err(OverlayError::Unsupported)
    }
}

impl OverlaySurface for std::convert::Infallible {
    fn set_opacity(&mut self, _opacity: f32) {
        match *self {}
    }
}
