//! Overlay host for a terminal.
//!
//! The overlay is a full-width band on the current stderr line, repainted on
//! every opacity change. Its colour is the backdrop (the background of the
//! mode currently live underneath) mixed with the overlay colour by opacity.
//! Dropping the surface clears the line.

use std::cell::Cell;
use std::rc::Rc;

use console::{Style, Term};
use terminal_size::{terminal_size, Width};
use themeshift::{
    rgb_to_ansi256, OverlayError, OverlayHost, OverlaySpec, OverlaySurface, Rgb,
};
use tracing::debug;

const FALLBACK_WIDTH: usize = 60;

/// Creates overlay bands on stderr.
pub struct TerminalHost {
    term: Term,
    backdrop: Rc<Cell<Rgb>>,
    use_color: bool,
}

impl TerminalHost {
    /// `backdrop` holds the background of the live mode; the caller keeps it
    /// current through a controller subscription. Without `use_color` every
    /// overlay is refused, since a band without colour codes shows nothing.
    pub fn new(backdrop: Rc<Cell<Rgb>>, use_color: bool) -> Self {
        Self {
            term: Term::stderr(),
            backdrop,
            use_color,
        }
    }
}

impl OverlayHost for TerminalHost {
    type Surface = TerminalOverlay;

    fn create_overlay(&mut self, spec: &OverlaySpec) -> Result<TerminalOverlay, OverlayError> {
        if !self.use_color || !self.term.is_term() {
            return Err(OverlayError::Unsupported);
        }
        let width = terminal_size()
            .map(|(Width(w), _)| w as usize)
            .unwrap_or(FALLBACK_WIDTH);
        debug!(width, color = %spec.background, "creating terminal overlay");
        Ok(TerminalOverlay {
            term: self.term.clone(),
            backdrop: Rc::clone(&self.backdrop),
            color: spec.background,
            width,
        })
    }
}

/// A painted band on the terminal. Cleared when dropped.
pub struct TerminalOverlay {
    term: Term,
    backdrop: Rc<Cell<Rgb>>,
    color: Rgb,
    width: usize,
}

impl OverlaySurface for TerminalOverlay {
    fn set_opacity(&mut self, opacity: f32) {
        let line = band(self.backdrop.get(), self.color, opacity, self.width);
        let result = self
            .term
            .clear_line()
            .and_then(|()| self.term.write_str(&line));
        if let Err(err) = result {
            debug!(%err, "failed to paint terminal overlay");
        }
    }
}

impl Drop for TerminalOverlay {
    fn drop(&mut self) {
        if let Err(err) = self.term.clear_line() {
            debug!(%err, "failed to clear terminal overlay");
        }
    }
}

/// Renders one band: `width` cells in the mixed colour, with a percentage
/// label in a contrasting foreground.
fn band(backdrop: Rgb, color: Rgb, opacity: f32, width: usize) -> String {
    let fill = backdrop.mix(color, opacity);
    let label = format!(" {:>3}% ", (opacity.clamp(0.0, 1.0) * 100.0).round() as u32);
    let text = format!("{:<width$}", label, width = width.max(label.len()));
    let foreground = if luminance(fill) > 128.0 { 16 } else { 231 };
    Style::new()
        .on_color256(rgb_to_ansi256(fill))
        .color256(foreground)
        .force_styling(true)
        .apply_to(text)
        .to_string()
}

fn luminance(Rgb(r, g, b): Rgb) -> f32 {
    0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32
}
