//! The theme controller.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::state::{Toggle, TransitionState};
use super::subscribers::{SubscriptionId, Subscribers};
use crate::ambient::AmbientSignal;
use crate::config::{PersistPolicy, ThemeConfig, TransitionConfig};
use crate::mode::ThemeMode;
use crate::overlay::{OverlayHost, OverlaySpec, OverlaySurface};
use crate::persistence::ThemePersistence;
use crate::resolver::ThemeResolver;
use crate::store::PreferenceStore;

/// A running transition. Owns the overlay; dropping it removes the overlay.
struct Transition<O> {
    surface: O,
    target: ThemeMode,
    state: TransitionState,
    started: Instant,
    phase_started: Instant,
    opacity: f32,
}

impl<O: OverlaySurface> Transition<O> {
    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.surface.set_opacity(opacity);
    }

    fn enter(&mut self, state: TransitionState, at: Instant) {
        debug!(from = %self.state, to = %state, "theme transition");
        self.state = state;
        self.phase_started = at;
    }

    fn progress(&self, now: Instant, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.phase_started);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }
}

/// Owns the application's mode and switches it behind an overlay.
///
/// Build one with [`ThemeController::init`] at start-up and hand it (or a
/// reference to it) to whatever renders. The view reads [`is_dark`](Self::is_dark)
/// and registers with [`subscribe`](Self::subscribe) to redraw when the mode
/// changes. The control that switches themes calls [`toggle`](Self::toggle).
///
/// # Example
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use themeshift::{
///     FixedAmbient, MemoryStore, OverlayError, OverlayHost, OverlaySpec, OverlaySurface,
///     ThemeConfig, ThemeController, ThemeMode, Toggle, TransitionState,
/// };
///
/// struct Layer;
/// impl OverlaySurface for Layer {
///     fn set_opacity(&mut self, _opacity: f32) {}
/// }
///
/// struct Host;
/// impl OverlayHost for Host {
///     type Surface = Layer;
///     fn create_overlay(&mut self, _spec: &OverlaySpec) -> Result<Layer, OverlayError> {
///         Ok(Layer)
///     }
/// }
///
/// let mut theme = ThemeController::init(
///     ThemeConfig::default(),
///     MemoryStore::new(),
///     &FixedAmbient::dark(),
///     Host,
/// );
///
/// let start = Instant::now();
/// assert_eq!(theme.toggle(start), Toggle::Started);
///
/// theme.advance(start + Duration::from_millis(200));
/// assert_eq!(theme.state(), TransitionState::FadingIn);
/// assert_eq!(theme.mode(), ThemeMode::Dark);
///
/// theme.advance(start + Duration::from_millis(450));
/// assert_eq!(theme.state(), TransitionState::Committed);
/// assert_eq!(theme.mode(), ThemeMode::Light);
///
/// theme.advance(start + Duration::from_millis(1000));
/// assert_eq!(theme.state(), TransitionState::Idle);
/// ```
pub struct ThemeController<S, H: OverlayHost> {
    mode: ThemeMode,
    config: ThemeConfig,
    persistence: ThemePersistence<S>,
    host: H,
    transition: Option<Transition<H::Surface>>,
    subscribers: Subscribers,
}

impl<S: PreferenceStore, H: OverlayHost> ThemeController<S, H> {
    /// Resolves the initial mode and builds the controller.
    ///
    /// The stored preference wins; otherwise the ambient signal decides,
    /// defaulting to dark. With [`PersistPolicy::OnResolve`] the result is
    /// written back to the store if it is not already there.
    ///
    /// A safety timeout that would cut the transition short is extended
    /// past the transition's length.
    pub fn init<A>(mut config: ThemeConfig, store: S, ambient: &A, host: H) -> Self
    where
        A: AmbientSignal + ?Sized,
    {
        if let Err(err) = config.validate() {
            let timing = &mut config.transition;
            timing.safety_timeout_ms = timing
                .fade_in_ms
                .saturating_add(timing.hold_ms)
                .saturating_add(timing.fade_out_ms)
                .saturating_add(TransitionConfig::default().safety_timeout_ms);
            warn!(
                %err,
                safety_timeout_ms = timing.safety_timeout_ms,
                "extending theme safety timeout"
            );
        }

        let mut persistence = ThemePersistence::new(store);
        let stored = persistence.read();
        let mode = ThemeResolver::resolve_stored(stored, ambient);
        debug!(%mode, from_store = stored.is_some(), "resolved initial theme");

        if config.persist == PersistPolicy::OnResolve && stored != Some(mode) {
            persistence.write(mode);
        }

        Self {
            mode,
            config,
            persistence,
            host,
            transition: None,
            subscribers: Subscribers::default(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn state(&self) -> TransitionState {
        self.transition
            .as_ref()
            .map_or(TransitionState::Idle, |t| t.state)
    }

    /// Current overlay opacity, or `None` when no overlay exists.
    pub fn overlay_opacity(&self) -> Option<f32> {
        self.transition.as_ref().map(|t| t.opacity)
    }

    /// The instant by which the running transition is forcibly finished.
    ///
    /// Hosts whose frame callbacks can stall should arm a timer for this
    /// instant and call [`expire`](Self::expire) when it fires.
    pub fn deadline(&self) -> Option<Instant> {
        self.transition
            .as_ref()
            .map(|t| t.started + self.config.transition.safety_timeout())
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn persistence(&self) -> &ThemePersistence<S> {
        &self.persistence
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Registers a callback run synchronously whenever the mode changes.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(ThemeMode) + 'static,
    {
        self.subscribers.add(Box::new(callback))
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Starts switching to the other mode.
    ///
    /// Only accepted while [`Idle`](TransitionState::Idle); a toggle during a
    /// running transition is dropped, not queued. When the host cannot
    /// create an overlay the mode flips on the spot.
    pub fn toggle(&mut self, now: Instant) -> Toggle {
        if let Some(transition) = &self.transition {
            debug!(state = %transition.state, "toggle ignored during transition");
            return Toggle::Ignored;
        }

        let target = self.mode.toggled();
        let spec = OverlaySpec {
            background: self.config.palette.background(target),
            z_index: self.config.overlay.z_index,
            input_transparent: true,
        };

        match self.host.create_overlay(&spec) {
            Ok(surface) => {
                let mut transition = Transition {
                    surface,
                    target,
                    state: TransitionState::FadingIn,
                    started: now,
                    phase_started: now,
                    opacity: 0.0,
                };
                transition.set_opacity(0.0);
                self.transition = Some(transition);
                debug!(%target, "theme transition started");
                Toggle::Started
            }
            Err(err) => {
                warn!(%err, "no overlay available; switching theme without transition");
                self.commit(target);
                Toggle::Immediate
            }
        }
    }

    /// Frame callback: moves the running transition forward to `now`.
    ///
    /// A late frame that spans several phases runs them all in order, so the
    /// mode still flips before the fade-out begins.
    pub fn advance(&mut self, now: Instant) {
        let timing = self.config.transition;

        loop {
            let Some(transition) = self.transition.as_mut() else {
                return;
            };

            match transition.state {
                TransitionState::FadingIn => {
                    let duration = timing.fade_in();
                    let t = transition.progress(now, duration);
                    if t < 1.0 {
                        transition.set_opacity(timing.fade_in_easing.apply(t));
                        break;
                    }
                    transition.set_opacity(1.0);
                    let at = transition.phase_started + duration;
                    transition.enter(TransitionState::Committed, at);
                    let target = transition.target;
                    self.commit(target);
                }
                TransitionState::Committed => {
                    let hold = timing.hold();
                    if transition.progress(now, hold) < 1.0 {
                        break;
                    }
                    let at = transition.phase_started + hold;
                    transition.enter(TransitionState::FadingOut, at);
                }
                TransitionState::FadingOut => {
                    let t = transition.progress(now, timing.fade_out());
                    if t < 1.0 {
                        transition.set_opacity(1.0 - timing.fade_out_easing.apply(t));
                        break;
                    }
                    transition.set_opacity(0.0);
                    self.release();
                    return;
                }
                TransitionState::Idle => {
                    self.release();
                    return;
                }
            }
        }

        self.expire(now);
    }

    /// Finishes a transition that has outlived its safety timeout.
    ///
    /// An uncommitted mode change is committed, the overlay is released, and
    /// the controller returns to idle. Returns `true` if anything was
    /// finished.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {}
            _ => return false,
        }
        let Some(transition) = self.transition.take() else {
            return false;
        };

        warn!(
            state = %transition.state,
            "theme transition exceeded its safety timeout; releasing overlay"
        );
        let pending = transition.state == TransitionState::FadingIn;
        let target = transition.target;
        drop(transition);
        if pending {
            self.commit(target);
        }
        true
    }

    fn commit(&mut self, mode: ThemeMode) {
        self.mode = mode;
        debug!(%mode, "theme committed");
        self.persistence.write(mode);
        self.subscribers.notify(mode);
    }

    fn release(&mut self) {
        if self.transition.take().is_some() {
            debug!("theme transition finished; overlay released");
        }
    }
}

impl<S, H: OverlayHost> std::fmt::Debug for ThemeController<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("mode", &self.mode)
            .field(
                "state",
                &self
                    .transition
                    .as_ref()
                    .map_or(TransitionState::Idle, |t| t.state),
            )
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::FixedAmbient;
    use crate::overlay::{NoOverlay, OverlayError};
    use crate::persistence::THEME_KEY;
    use crate::store::{MemoryStore, UnavailableStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Log {
        created: Vec<OverlaySpec>,
        live: usize,
        opacities: Vec<f32>,
    }

    struct Layer(Rc<RefCell<Log>>);

    impl OverlaySurface for Layer {
        fn set_opacity(&mut self, opacity: f32) {
            self.0.borrow_mut().opacities.push(opacity);
        }
    }

    impl Drop for Layer {
        fn drop(&mut self) {
            self.0.borrow_mut().live -= 1;
        }
    }

    #[derive(Default)]
    struct Host {
        log: Rc<RefCell<Log>>,
        fail: bool,
    }

    impl OverlayHost for Host {
        type Surface = Layer;

        fn create_overlay(&mut self, spec: &OverlaySpec) -> Result<Layer, OverlayError> {
            if self.fail {
                return Err(OverlayError::Host("detached".to_string()));
            }
            let mut log = self.log.borrow_mut();
            log.created.push(*spec);
            log.live += 1;
            Ok(Layer(Rc::clone(&self.log)))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller(store: MemoryStore) -> (ThemeController<MemoryStore, Host>, Rc<RefCell<Log>>) {
        let host = Host::default();
        let log = Rc::clone(&host.log);
        let c = ThemeController::init(ThemeConfig::default(), store, &FixedAmbient::dark(), host);
        (c, log)
    }

    #[test]
    fn test_init_persists_resolution_by_default() {
        let (c, _) = controller(MemoryStore::new());
        assert_eq!(c.mode(), ThemeMode::Dark);
        assert_eq!(c.persistence().store().get(THEME_KEY), Some("dark"));
    }

    #[test]
    fn test_short_safety_timeout_cannot_flip_under_transparent_overlay() {
        let mut config = ThemeConfig::default();
        config.transition.safety_timeout_ms = 100;
        let host = Host::default();
        let log = Rc::clone(&host.log);
        let mut c = ThemeController::init(config, MemoryStore::new(), &FixedAmbient::dark(), host);
        assert!(c.config().validate().is_ok());
        assert!(c.config().transition.safety_timeout() > c.config().transition.total());

        let start = Instant::now();
        assert_eq!(c.toggle(start), Toggle::Started);
        c.advance(start + ms(200));
        assert_eq!(c.state(), TransitionState::FadingIn);
        assert_eq!(c.mode(), ThemeMode::Dark);
        assert_eq!(log.borrow().live, 1);

        c.advance(start + ms(1100));
        assert_eq!(c.state(), TransitionState::Idle);
        assert_eq!(c.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_init_on_toggle_policy_leaves_store_empty() {
        let config = ThemeConfig {
            persist: PersistPolicy::OnToggle,
            ..ThemeConfig::default()
        };
        let c = ThemeController::init(config, MemoryStore::new(), &FixedAmbient::light(), NoOverlay);
        assert_eq!(c.mode(), ThemeMode::Light);
        assert!(c.persistence().store().is_empty());
    }

    #[test]
    fn test_init_replaces_malformed_value_under_on_resolve() {
        let (c, _) = controller(MemoryStore::new().with(THEME_KEY, "purple"));
        assert_eq!(c.mode(), ThemeMode::Dark);
        assert_eq!(c.persistence().store().get(THEME_KEY), Some("dark"));
    }

    #[test]
    fn test_overlay_uses_target_background() {
        let (mut c, log) = controller(MemoryStore::new());
        assert_eq!(c.toggle(Instant::now()), Toggle::Started);

        let spec = log.borrow().created[0];
        assert_eq!(spec.background, c.config().palette.light);
        assert_eq!(spec.z_index, 9999);
        assert!(spec.input_transparent);
        assert_eq!(log.borrow().opacities, vec![0.0]);
        assert_eq!(c.overlay_opacity(), Some(0.0));
    }

    #[test]
    fn test_mode_flips_only_when_opaque() {
        let (mut c, log) = controller(MemoryStore::new());
        let start = Instant::now();
        let _ = c.toggle(start);

        c.advance(start + ms(399));
        assert_eq!(c.mode(), ThemeMode::Dark);
        assert!(c.overlay_opacity().unwrap() < 1.0);

        c.advance(start + ms(400));
        assert_eq!(c.mode(), ThemeMode::Light);
        assert_eq!(c.state(), TransitionState::Committed);
        assert_eq!(c.overlay_opacity(), Some(1.0));
        assert_eq!(log.borrow().opacities.last(), Some(&1.0));
    }

    #[test]
    fn test_subscribers_see_opaque_overlay() {
        let (mut c, log) = controller(MemoryStore::new());
        let observed = Rc::new(RefCell::new(Vec::new()));
        {
            let observed = Rc::clone(&observed);
            let log = Rc::clone(&log);
            c.subscribe(move |mode| {
                let opacity = log.borrow().opacities.last().copied();
                observed.borrow_mut().push((mode, opacity));
            });
        }

        let start = Instant::now();
        let _ = c.toggle(start);
        c.advance(start + ms(2000));

        assert_eq!(*observed.borrow(), vec![(ThemeMode::Light, Some(1.0))]);
        assert_eq!(c.state(), TransitionState::Idle);
    }

    #[test]
    fn test_hold_then_fade_out() {
        let (mut c, _) = controller(MemoryStore::new());
        let start = Instant::now();
        let _ = c.toggle(start);

        c.advance(start + ms(450));
        assert_eq!(c.state(), TransitionState::Committed);
        assert_eq!(c.overlay_opacity(), Some(1.0));

        c.advance(start + ms(500));
        assert_eq!(c.state(), TransitionState::FadingOut);

        c.advance(start + ms(750));
        let opacity = c.overlay_opacity().unwrap();
        assert!(opacity > 0.0 && opacity < 1.0);

        c.advance(start + ms(1000));
        assert_eq!(c.state(), TransitionState::Idle);
        assert_eq!(c.overlay_opacity(), None);
    }

    #[test]
    fn test_toggle_ignored_while_running() {
        let (mut c, log) = controller(MemoryStore::new());
        let start = Instant::now();
        let _ = c.toggle(start);

        for offset in [0, 100, 450, 700] {
            c.advance(start + ms(offset));
            let state = c.state();
            assert_eq!(c.toggle(start + ms(offset)), Toggle::Ignored);
            assert_eq!(c.state(), state);
        }
        assert_eq!(log.borrow().created.len(), 1);
    }

    #[test]
    fn test_overlay_failure_flips_immediately() {
        let host = Host {
            fail: true,
            ..Host::default()
        };
        let mut c =
            ThemeController::init(ThemeConfig::default(), MemoryStore::new(), &FixedAmbient::dark(), host);
        let calls = Rc::new(RefCell::new(0));
        {
            let calls = Rc::clone(&calls);
            c.subscribe(move |_| *calls.borrow_mut() += 1);
        }

        assert_eq!(c.toggle(Instant::now()), Toggle::Immediate);
        assert_eq!(c.mode(), ThemeMode::Light);
        assert_eq!(c.state(), TransitionState::Idle);
        assert_eq!(c.persistence().store().get(THEME_KEY), Some("light"));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_expire_before_deadline_does_nothing() {
        let (mut c, log) = controller(MemoryStore::new());
        let start = Instant::now();
        let _ = c.toggle(start);

        assert_eq!(c.deadline(), Some(start + ms(3000)));
        assert!(!c.expire(start + ms(2999)));
        assert_eq!(c.state(), TransitionState::FadingIn);
        assert_eq!(log.borrow().live, 1);
    }

    #[test]
    fn test_expire_commits_and_releases() {
        let (mut c, log) = controller(MemoryStore::new());
        let start = Instant::now();
        let _ = c.toggle(start);

        assert!(c.expire(start + ms(3000)));
        assert_eq!(c.mode(), ThemeMode::Light);
        assert_eq!(c.state(), TransitionState::Idle);
        assert_eq!(c.deadline(), None);
        assert_eq!(log.borrow().live, 0);
        assert!(!c.expire(start + ms(4000)));
    }

    #[test]
    fn test_expire_after_commit_does_not_flip_again() {
        let (mut c, log) = controller(MemoryStore::new());
        let start = Instant::now();
        let _ = c.toggle(start);
        c.advance(start + ms(450));
        assert_eq!(c.mode(), ThemeMode::Light);

        assert!(c.expire(start + ms(5000)));
        assert_eq!(c.mode(), ThemeMode::Light);
        assert_eq!(log.borrow().live, 0);
    }

    #[test]
    fn test_dropping_controller_releases_overlay() {
        let (mut c, log) = controller(MemoryStore::new());
        let _ = c.toggle(Instant::now());
        assert_eq!(log.borrow().live, 1);
        drop(c);
        assert_eq!(log.borrow().live, 0);
    }

    #[test]
    fn test_unsubscribed_callback_not_called() {
        let (mut c, _) = controller(MemoryStore::new());
        let calls = Rc::new(RefCell::new(0));
        let id = {
            let calls = Rc::clone(&calls);
            c.subscribe(move |_| *calls.borrow_mut() += 1)
        };
        assert!(c.unsubscribe(id));

        let start = Instant::now();
        let _ = c.toggle(start);
        c.advance(start + ms(2000));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_unavailable_storage_does_not_block_transition() {
        let mut c = ThemeController::init(
            ThemeConfig::default(),
            UnavailableStore,
            &FixedAmbient::light(),
            Host::default(),
        );
        assert_eq!(c.mode(), ThemeMode::Light);

        let start = Instant::now();
        assert_eq!(c.toggle(start), Toggle::Started);
        c.advance(start + ms(1000));
        assert_eq!(c.mode(), ThemeMode::Dark);
        assert_eq!(c.state(), TransitionState::Idle);
    }

    #[test]
    fn test_zero_length_transition_completes_in_one_frame() {
        let mut config = ThemeConfig::default();
        config.transition.fade_in_ms = 0;
        config.transition.hold_ms = 0;
        config.transition.fade_out_ms = 0;
        let host = Host::default();
        let log = Rc::clone(&host.log);
        let mut c = ThemeController::init(config, MemoryStore::new(), &FixedAmbient::dark(), host);

        let start = Instant::now();
        let _ = c.toggle(start);
        c.advance(start);
        assert_eq!(c.mode(), ThemeMode::Light);
        assert_eq!(c.state(), TransitionState::Idle);
        assert_eq!(log.borrow().opacities, vec![0.0, 1.0, 0.0]);
    }
}
