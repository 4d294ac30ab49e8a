use std::cell::RefCell;
use std::rc::Rc;

use themeshift::{OverlayError, OverlayHost, OverlaySpec, OverlaySurface};

/// What a [`RecordingHost`] has seen.
#[derive(Debug, Default)]
pub struct OverlayLog {
    pub created: Vec<OverlaySpec>,
    pub removed: usize,
    pub opacities: Vec<f32>,
}

impl OverlayLog {
    pub fn live(&self) -> usize {
        self.created.len() - self.removed
    }
}

pub struct RecordedOverlay(Rc<RefCell<OverlayLog>>);

impl OverlaySurface for RecordedOverlay {
    fn set_opacity(&mut self, opacity: f32) {
        self.0.borrow_mut().opacities.push(opacity);
    }
}

impl Drop for RecordedOverlay {
    fn drop(&mut self) {
        self.0.borrow_mut().removed += 1;
    }
}

/// An overlay host that records every overlay it creates.
#[derive(Default)]
pub struct RecordingHost {
    pub log: Rc<RefCell<OverlayLog>>,
}

impl RecordingHost {
    pub fn new() -> (Self, Rc<RefCell<OverlayLog>>) {
        let host = Self::default();
        let log = Rc::clone(&host.log);
        (host, log)
    }
}

impl OverlayHost for RecordingHost {
    type Surface = RecordedOverlay;

    fn create_overlay(&mut self, spec: &OverlaySpec) -> Result<RecordedOverlay, OverlayError> {
        self.log.borrow_mut().created.push(*spec);
        Ok(RecordedOverlay(Rc::clone(&self.log)))
    }
}
