//! The bridge driver.
//!
//! The hooking shim owns one [`Bridge`] and calls one method per intercepted
//! host function. Each method takes a `forward` closure that runs the original
//! host function, so notifications land on the correct side of it:
//!
//! | callback              | order                                          |
//! |-----------------------|------------------------------------------------|
//! | frame presented       | surface → host swap                            |
//! | button (either site)  | session/time/input → host handler              |
//! | frame update          | tick → host update → time                      |
//! | editor/gameplay init  | LevelInit → host init                          |
//! | reset                 | LevelReset → host reset                        |
//! | quit                  | LevelQuit → host quit → session inactive       |
//! | actor destroyed       | host destroy → PlayerDeath (if dead)           |
//!
//! Presents, frame updates, resets and destroys first check that some session
//! still exists, and leave the level if none does.

use std::fmt;

use crate::events::Consumer;
use crate::frame::FramePresentationTap;
use crate::host::{Actor, Host, HostLayout, WindowHandle};
use crate::input::{GameModeContext, HookStrategy, InputSite, NormalizedAction, RawInputSignal};
use crate::lifecycle::{LifecycleNotifier, SessionPhase};
use crate::session::SessionState;
use crate::time_source::read_time;
use crate::types::{Config, Result};

/// Owns the session state and routes host callbacks to the consumer.
pub struct Bridge<H: Host, C: Consumer> {
    host: H,
    consumer: C,
    layout: HostLayout,
    session: SessionState,
    lifecycle: LifecycleNotifier,
    frame_tap: FramePresentationTap,
    torn_down: bool,
}

impl<H: Host, C: Consumer> Bridge<H, C> {
    /// Create the bridge and signal the consumer that it is loaded.
    pub fn new(host: H, mut consumer: C, layout: HostLayout) -> Self {
        tracing::info!("bridge loaded (host layout {})", layout.version);
        consumer.on_load();
        Self {
            host,
            consumer,
            layout,
            session: SessionState::new(),
            lifecycle: LifecycleNotifier::new(),
            frame_tap: FramePresentationTap::new(),
            torn_down: false,
        }
    }

    /// Create the bridge with the layout selected by `config`.
    pub fn from_config(host: H, consumer: C, config: &Config) -> Result<Self> {
        let layout = config.layout()?;
        Ok(Self::new(host, consumer, layout))
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }

    pub fn layout(&self) -> &HostLayout {
        &self.layout
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.lifecycle.phase()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Host is about to present a frame.
    pub fn on_frame_presented<R>(
        &mut self,
        window: Option<WindowHandle<'_>>,
        swap: impl FnOnce(&mut H) -> R,
    ) -> R {
        self.observe_session_absence();
        if let Some(surface) = self.frame_tap.resolve(window, &self.layout) {
            self.consumer.notify_surface_ready(surface);
        }
        swap(&mut self.host)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Button transition at the game-layer handler.
    pub fn on_game_layer_button<R>(
        &mut self,
        raw: RawInputSignal,
        forward: impl FnOnce(&mut H) -> R,
    ) -> R {
        self.handle_input(InputSite::GameLayer, raw);
        forward(&mut self.host)
    }

    /// Button transition at the player object's push/release.
    pub fn on_player_button<R>(
        &mut self,
        raw: RawInputSignal,
        forward: impl FnOnce(&mut H) -> R,
    ) -> R {
        self.handle_input(InputSite::PlayerObject, raw);
        forward(&mut self.host)
    }

    fn handle_input(&mut self, site: InputSite, raw: RawInputSignal) -> Option<NormalizedAction> {
        let strategy = HookStrategy::select(self.consumer.should_use_alternate_input_hook());
        let Some(classifier) = strategy.classifier_for(site) else {
            tracing::trace!("{site:?} pass-through under {strategy:?}");
            return None;
        };

        if !self.host.has_session() {
            self.lifecycle.observe_no_session(&mut self.session);
            self.consumer.notify_session_active(false);
            return None;
        }

        self.session.set_in_level(true);
        self.consumer.notify_session_active(true);
        self.refresh_time();

        let ctx = GameModeContext::capture(&self.host, raw.actor());
        let consumer = &self.consumer;
        let action = classifier(raw, &ctx, &mut || {
            consumer.should_force_secondary_actor_audio()
        })?;

        tracing::debug!(
            "input button={} secondary={} press={} at {:.4}",
            action.button_id,
            action.is_secondary_actor,
            action.is_press,
            self.session.current_time()
        );
        self.consumer
            .notify_input_event(action.button_id, action.is_secondary_actor, action.is_press);
        Some(action)
    }

    fn refresh_time(&mut self) {
        let time = read_time(self.host.gameplay_session(), &self.layout);
        self.session.set_current_time(time);
        self.consumer.notify_current_time(time);
    }

    // =========================================================================
    // Game loop
    // =========================================================================

    /// Per-frame game-layer update.
    pub fn on_frame_update<R>(&mut self, dt: f32, update: impl FnOnce(&mut H) -> R) -> R {
        if self.host.gameplay_session().is_some() {
            if self.lifecycle.phase() == SessionPhase::Gameplay && self.session.set_in_level(true)
            {
                self.consumer.notify_session_active(true);
            }
        } else {
            self.observe_session_absence();
        }

        self.consumer.notify_frame_tick(dt);
        let result = update(&mut self.host);
        self.refresh_time();
        result
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Editor session construction.
    pub fn on_editor_init<R>(&mut self, init: impl FnOnce(&mut H) -> R) -> R {
        let event = self.lifecycle.editor_init();
        self.consumer.notify_lifecycle(event);
        init(&mut self.host)
    }

    /// Gameplay session construction.
    pub fn on_gameplay_init<R>(&mut self, init: impl FnOnce(&mut H) -> R) -> R {
        let event = self.lifecycle.gameplay_init();
        self.consumer.notify_lifecycle(event);
        init(&mut self.host)
    }

    /// Gameplay restart.
    pub fn on_level_reset<R>(&mut self, reset: impl FnOnce(&mut H) -> R) -> R {
        self.observe_session_absence();
        let event = self.lifecycle.reset();
        self.consumer.notify_lifecycle(event);
        reset(&mut self.host)
    }

    /// Gameplay exit. `is_in_level` is false once this returns.
    pub fn on_level_quit<R>(&mut self, quit: impl FnOnce(&mut H) -> R) -> R {
        let event = self.lifecycle.quit();
        self.consumer.notify_lifecycle(event);
        let result = quit(&mut self.host);

        let editor_alive = self.host.editor_session_active();
        if self.lifecycle.finish_quit(&mut self.session, editor_alive) {
            self.consumer.notify_session_active(false);
        }
        result
    }

    /// Editor teardown.
    pub fn on_editor_exit<R>(&mut self, exit: impl FnOnce(&mut H) -> R) -> R {
        let result = exit(&mut self.host);
        let gameplay_alive = self.host.gameplay_session().is_some();
        if self
            .lifecycle
            .finish_editor_exit(&mut self.session, gameplay_alive)
        {
            self.consumer.notify_session_active(false);
        }
        result
    }

    /// Player destruction. `destroy` runs the host function and reports
    /// whether the actor ended up dead; that value is returned.
    pub fn on_actor_destroyed(&mut self, actor: Actor, destroy: impl FnOnce(&mut H) -> bool) -> bool {
        self.observe_session_absence();
        let is_dead = destroy(&mut self.host);
        if let Some(event) = self.lifecycle.death(actor, is_dead) {
            self.consumer.notify_lifecycle(event);
        }
        is_dead
    }

    /// Leave the level if the host has neither a gameplay nor an editor
    /// session. The host can drop gameplay without a quit callback.
    fn observe_session_absence(&mut self) {
        if !self.host.has_session() && self.lifecycle.observe_no_session(&mut self.session) {
            self.consumer.notify_session_active(false);
        }
    }

    // =========================================================================
    // Process lifecycle
    // =========================================================================

    /// Signal the consumer that the bridge is going away. Idempotent; also
    /// runs on drop.
    ///
    /// A bridge held in a `static` by the hooking shim is never dropped. The
    /// shim must call this from the process exit handler it registers.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.session.clear();
        self.consumer.on_unload();
        tracing::info!("bridge torn down");
    }
}

impl<H: Host, C: Consumer> Drop for Bridge<H, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<H: Host, C: Consumer> fmt::Debug for Bridge<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("layout", &self.layout.version)
            .field("session", &self.session)
            .field("phase", &self.lifecycle.phase())
            .field("surface", &self.frame_tap.surface())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::consumer::MockConsumer;
    use crate::events::LifecycleEvent;
    use crate::host::{HostImage, SessionHandle};
    use mockall::predicate::eq;
    use mockall::Sequence;

    #[derive(Default)]
    struct TestHost {
        session: Option<HostImage>,
        editor: bool,
        platformer: bool,
    }

    impl TestHost {
        fn gameplay(time: f64, platformer: bool) -> Self {
            let mut image = HostImage::new();
            image
                .write_f64(HostLayout::DEFAULT.session_time_offset(), time)
                .unwrap();
            Self {
                session: Some(image),
                editor: false,
                platformer,
            }
        }
    }

    impl Host for TestHost {
        fn gameplay_session(&self) -> Option<SessionHandle<'_>> {
            self.session.as_ref().map(HostImage::session)
        }
        fn editor_session_active(&self) -> bool {
            self.editor
        }
        fn two_player_mode(&self) -> bool {
            false
        }
        fn is_platformer(&self, _actor: Actor) -> bool {
            self.platformer
        }
    }

    fn mock_consumer() -> MockConsumer {
        let mut consumer = MockConsumer::new();
        consumer.expect_on_load().times(1).return_const(());
        consumer.expect_on_unload().times(1).return_const(());
        consumer
    }

    #[test]
    fn test_jump_notifies_session_time_then_input() {
        let mut consumer = mock_consumer();
        let mut seq = Sequence::new();
        consumer
            .expect_should_use_alternate_input_hook()
            .return_const(false);
        consumer
            .expect_notify_session_active()
            .with(eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        consumer
            .expect_notify_current_time()
            .with(eq(7.5))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        consumer
            .expect_notify_input_event()
            .with(eq(1), eq(false), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        consumer.expect_should_force_secondary_actor_audio().never();

        let mut bridge = Bridge::new(TestHost::gameplay(7.5, true), consumer, HostLayout::DEFAULT);
        let forwarded = bridge.on_game_layer_button(RawInputSignal::new(1, true, true), |_| true);
        assert!(forwarded);
        assert!(bridge.session().is_in_level());
        assert_eq!(bridge.session().current_time(), 7.5);
    }

    #[test]
    fn test_steering_outside_platformer_sends_no_input() {
        let mut consumer = mock_consumer();
        consumer
            .expect_should_use_alternate_input_hook()
            .return_const(false);
        consumer.expect_notify_session_active().return_const(());
        consumer.expect_notify_current_time().return_const(());
        consumer.expect_notify_input_event().never();

        let mut bridge =
            Bridge::new(TestHost::gameplay(1.0, false), consumer, HostLayout::DEFAULT);
        bridge.on_game_layer_button(RawInputSignal::new(2, true, true), |_| ());
    }

    #[test]
    fn test_pass_through_site_touches_nothing() {
        let mut consumer = mock_consumer();
        consumer
            .expect_should_use_alternate_input_hook()
            .return_const(true);
        consumer.expect_notify_session_active().never();
        consumer.expect_notify_current_time().never();
        consumer.expect_notify_input_event().never();

        let mut bridge = Bridge::new(TestHost::gameplay(1.0, true), consumer, HostLayout::DEFAULT);
        let mut forwarded = false;
        bridge.on_game_layer_button(RawInputSignal::new(1, true, true), |_| forwarded = true);
        assert!(forwarded);
        assert!(!bridge.session().is_in_level());
    }

    #[test]
    fn test_no_session_clears_flag_without_classifying() {
        let mut consumer = mock_consumer();
        consumer
            .expect_should_use_alternate_input_hook()
            .return_const(false);
        consumer
            .expect_notify_session_active()
            .with(eq(false))
            .times(1)
            .return_const(());
        consumer.expect_notify_current_time().never();
        consumer.expect_notify_input_event().never();

        let mut bridge = Bridge::new(TestHost::default(), consumer, HostLayout::DEFAULT);
        bridge.on_game_layer_button(RawInputSignal::new(1, true, true), |_| ());
        assert!(!bridge.session().is_in_level());
    }

    #[test]
    fn test_quit_precedes_session_inactive() {
        let mut consumer = mock_consumer();
        let mut seq = Sequence::new();
        consumer
            .expect_should_use_alternate_input_hook()
            .return_const(false);
        consumer
            .expect_notify_session_active()
            .with(eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        consumer.expect_notify_current_time().return_const(());
        consumer
            .expect_notify_input_event()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        consumer
            .expect_notify_lifecycle()
            .with(eq(LifecycleEvent::LevelQuit))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        consumer
            .expect_notify_session_active()
            .with(eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut bridge = Bridge::new(TestHost::gameplay(2.0, true), consumer, HostLayout::DEFAULT);
        bridge.on_game_layer_button(RawInputSignal::new(1, true, true), |_| ());
        bridge.on_level_quit(|host| host.session = None);
        assert!(!bridge.session().is_in_level());
        assert_eq!(bridge.phase(), SessionPhase::NoSession);
    }

    #[test]
    fn test_from_config_selects_layout() {
        let bridge =
            Bridge::from_config(TestHost::default(), mock_consumer(), &Config::default()).unwrap();
        assert_eq!(bridge.layout(), &HostLayout::DEFAULT);
    }

    #[test]
    fn test_from_config_rejects_unknown_layout_before_load() {
        let mut config = Config::default();
        config.host.layout_version = "1.9-mac".to_string();

        // No on_load expectation: the consumer must not be told it is loaded.
        let consumer = MockConsumer::new();
        let err = Bridge::from_config(TestHost::default(), consumer, &config).unwrap_err();
        assert!(matches!(err, crate::types::Error::UnsupportedHost(_)));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let consumer = mock_consumer();
        let mut bridge = Bridge::new(TestHost::default(), consumer, HostLayout::DEFAULT);
        bridge.teardown();
        bridge.teardown();
        assert!(bridge.is_torn_down());
        // Drop runs teardown a third time; the mock enforces a single unload.
    }
}
