//! Frame loop for running a transition to completion.

use std::thread;
use std::time::{Duration, Instant};

use themeshift::{OverlayHost, PreferenceStore, ThemeController};

/// Roughly 60 frames per second.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Feeds frames to `theme` until its transition finishes.
///
/// Returns the number of frames delivered. The controller applies its own
/// safety timeout on each frame, so the loop ends even if the host clock
/// jumps.
pub fn run_to_idle<S, H>(theme: &mut ThemeController<S, H>, frame: Duration) -> usize
where
    S: PreferenceStore,
    H: OverlayHost,
{
    let mut frames = 0;
    while !theme.state().is_idle() {
        thread::sleep(frame);
        theme.advance(Instant::now());
        frames += 1;
    }
    frames
}
