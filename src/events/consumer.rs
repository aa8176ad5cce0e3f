//! The external consumer of normalized events.

use super::LifecycleEvent;
use crate::host::SurfaceHandle;

/// Receiver of the bridge's outbound calls.
///
/// Every call is synchronous on the host thread. The two `should_*` queries
/// are asked fresh on each callback that needs them.
#[cfg_attr(test, mockall::automock)]
pub trait Consumer {
    /// Bridge loaded into the host process.
    fn on_load(&mut self) {}

    /// Bridge torn down. Called at most once.
    fn on_unload(&mut self) {}

    fn notify_surface_ready(&mut self, surface: SurfaceHandle);

    fn notify_input_event(&mut self, button_id: u8, is_secondary_actor: bool, is_press: bool);

    fn notify_session_active(&mut self, active: bool);

    fn notify_current_time(&mut self, time: f64);

    fn notify_frame_tick(&mut self, dt: f32);

    fn notify_lifecycle(&mut self, kind: LifecycleEvent);

    /// Attribute non-primary input to player 2 outside two-player mode.
    fn should_force_secondary_actor_audio(&self) -> bool;

    /// Classify at the player-object call site instead of the game layer.
    fn should_use_alternate_input_hook(&self) -> bool;
}
