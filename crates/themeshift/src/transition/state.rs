//! Transition states and toggle outcomes.

/// Where the controller is in a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionState {
    /// No transition running; toggles are accepted.
    Idle,
    /// The overlay is fading in over the old mode.
    FadingIn,
    /// The overlay is opaque and the new mode is live underneath.
    Committed,
    /// The overlay is fading out over the new mode.
    FadingOut,
}

impl TransitionState {
    pub fn is_idle(self) -> bool {
        self == TransitionState::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransitionState::Idle => "idle",
            TransitionState::FadingIn => "fading-in",
            TransitionState::Committed => "committed",
            TransitionState::FadingOut => "fading-out",
        }
    }
}

impl std::fmt::Display for TransitionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a call to [`toggle`](super::ThemeController::toggle) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Toggle {
    /// A masked transition started; the mode flips on a later frame.
    Started,
    /// No overlay could be created, so the mode flipped immediately.
    Immediate,
    /// A transition was already running; nothing happened.
    Ignored,
}
