//! Consumer that records every outbound call.

use super::{BridgeEvent, Consumer, LifecycleEvent};
use crate::host::SurfaceHandle;

/// Records outbound calls in order and answers the queries from two flags.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Vec<BridgeEvent>,
    /// Answer to [`Consumer::should_force_secondary_actor_audio`].
    pub force_secondary: bool,
    /// Answer to [`Consumer::should_use_alternate_input_hook`].
    pub use_alternate_hook: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toggles(use_alternate_hook: bool, force_secondary: bool) -> Self {
        Self {
            events: Vec::new(),
            force_secondary,
            use_alternate_hook,
        }
    }

    pub fn events(&self) -> &[BridgeEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<BridgeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded input events only.
    pub fn inputs(&self) -> Vec<BridgeEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, BridgeEvent::Input { .. }))
            .copied()
            .collect()
    }

    /// Index of the first recorded event equal to `event`.
    pub fn position(&self, event: &BridgeEvent) -> Option<usize> {
        self.events.iter().position(|recorded| recorded == event)
    }
}

impl Consumer for Recorder {
    fn on_load(&mut self) {
        self.events.push(BridgeEvent::Loaded);
    }

    fn on_unload(&mut self) {
        self.events.push(BridgeEvent::Unloaded);
    }

    fn notify_surface_ready(&mut self, surface: SurfaceHandle) {
        self.events.push(BridgeEvent::SurfaceReady { surface });
    }

    fn notify_input_event(&mut self, button_id: u8, is_secondary_actor: bool, is_press: bool) {
        self.events.push(BridgeEvent::Input {
            button_id,
            is_secondary_actor,
            is_press,
        });
    }

    fn notify_session_active(&mut self, active: bool) {
        self.events.push(BridgeEvent::SessionActive { active });
    }

    fn notify_current_time(&mut self, time: f64) {
        self.events.push(BridgeEvent::CurrentTime { time });
    }

    fn notify_frame_tick(&mut self, dt: f32) {
        self.events.push(BridgeEvent::FrameTick { dt });
    }

    fn notify_lifecycle(&mut self, kind: LifecycleEvent) {
        self.events.push(BridgeEvent::Lifecycle { kind });
    }

    fn should_force_secondary_actor_audio(&self) -> bool {
        self.force_secondary
    }

    fn should_use_alternate_input_hook(&self) -> bool {
        self.use_alternate_hook
    }
}
