//! Level lifecycle tracking.
//!
//! Session phase machine:
//! ```text
//! NoSession ──editor init──→ Editor ──gameplay init──→ Gameplay ⟲ reset / death
//!     ↑                        │ ↑                        │
//!     └──────editor exit───────┘ └──quit (editor alive)───┤
//!     ↑                                                   │
//!     └──────────────quit (no editor)─────────────────────┘
//! ```
//! Editor entry emits `LevelInit` but leaves `is_in_level` alone; only
//! gameplay counts as being in a level for timing.

use serde::{Deserialize, Serialize};

use crate::events::LifecycleEvent;
use crate::host::Actor;
use crate::session::SessionState;

/// Which kind of host session is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    NoSession,
    Editor,
    Gameplay,
}

/// Maps host lifecycle calls to [`LifecycleEvent`]s and owns the phase.
///
/// NOT a separate actor - owned by the Bridge and called via &mut self.
#[derive(Debug, Default)]
pub struct LifecycleNotifier {
    phase: SessionPhase,
}

impl LifecycleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Editor session constructed.
    pub fn editor_init(&mut self) -> LifecycleEvent {
        tracing::debug!("lifecycle: {:?} -> Editor", self.phase);
        self.phase = SessionPhase::Editor;
        LifecycleEvent::LevelInit
    }

    /// Gameplay session constructed.
    pub fn gameplay_init(&mut self) -> LifecycleEvent {
        tracing::debug!("lifecycle: {:?} -> Gameplay", self.phase);
        self.phase = SessionPhase::Gameplay;
        LifecycleEvent::LevelInit
    }

    pub fn reset(&self) -> LifecycleEvent {
        if self.phase != SessionPhase::Gameplay {
            tracing::warn!("level reset outside gameplay (phase {:?})", self.phase);
        }
        LifecycleEvent::LevelReset
    }

    pub fn quit(&self) -> LifecycleEvent {
        if self.phase != SessionPhase::Gameplay {
            tracing::warn!("level quit outside gameplay (phase {:?})", self.phase);
        }
        LifecycleEvent::LevelQuit
    }

    /// Apply the end of a quit once the host has torn gameplay down.
    ///
    /// Returns true if `is_in_level` went from true to false.
    pub fn finish_quit(&mut self, session: &mut SessionState, editor_alive: bool) -> bool {
        let next = if editor_alive {
            SessionPhase::Editor
        } else {
            SessionPhase::NoSession
        };
        tracing::debug!("lifecycle: {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Self::leave_level(session)
    }

    /// Apply an editor teardown.
    ///
    /// Returns true if `is_in_level` went from true to false.
    pub fn finish_editor_exit(&mut self, session: &mut SessionState, gameplay_alive: bool) -> bool {
        if gameplay_alive {
            tracing::debug!("editor exited while gameplay is live");
            self.phase = SessionPhase::Gameplay;
            return false;
        }
        tracing::debug!("lifecycle: {:?} -> NoSession", self.phase);
        self.phase = SessionPhase::NoSession;
        Self::leave_level(session)
    }

    /// A player was destroyed; only a dead one produces an event.
    pub fn death(&self, actor: Actor, is_dead: bool) -> Option<LifecycleEvent> {
        if !is_dead {
            tracing::trace!("{actor:?} destroyed but not dead");
            return None;
        }
        tracing::debug!("{actor:?} died");
        Some(LifecycleEvent::PlayerDeath)
    }

    /// The host reports no session of either kind.
    pub fn observe_no_session(&mut self, session: &mut SessionState) -> bool {
        if self.phase != SessionPhase::NoSession {
            tracing::debug!("lifecycle: {:?} -> NoSession (observed)", self.phase);
            self.phase = SessionPhase::NoSession;
        }
        Self::leave_level(session)
    }

    fn leave_level(session: &mut SessionState) -> bool {
        let was_in_level = session.is_in_level();
        session.clear();
        was_in_level
    }
}
