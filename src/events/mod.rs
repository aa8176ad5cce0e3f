//! Outbound event vocabulary.
//!
//! The consumer receives normalized events through the [`Consumer`] trait.
//! [`BridgeEvent`] mirrors every outbound call as data so streams can be
//! recorded, compared and printed.

pub mod consumer;
pub mod recorder;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::host::SurfaceHandle;
use crate::input::NormalizedAction;

pub use consumer::Consumer;
pub use recorder::Recorder;

/// Level lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Gameplay or editor session constructed.
    LevelInit,
    /// Gameplay restarting; sent before the host resets.
    LevelReset,
    /// Gameplay session leaving; sent before teardown.
    LevelQuit,
    /// A player was destroyed and is dead.
    PlayerDeath,
}

/// One outbound consumer call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BridgeEvent {
    Loaded,
    Unloaded,
    SurfaceReady {
        surface: SurfaceHandle,
    },
    Input {
        button_id: u8,
        is_secondary_actor: bool,
        is_press: bool,
    },
    SessionActive {
        active: bool,
    },
    CurrentTime {
        time: f64,
    },
    FrameTick {
        dt: f32,
    },
    Lifecycle {
        kind: LifecycleEvent,
    },
}

impl From<NormalizedAction> for BridgeEvent {
    fn from(action: NormalizedAction) -> Self {
        BridgeEvent::Input {
            button_id: action.button_id,
            is_secondary_actor: action.is_secondary_actor,
            is_press: action.is_press,
        }
    }
}

impl fmt::Display for BridgeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeEvent::Loaded => write!(f, "loaded"),
            BridgeEvent::Unloaded => write!(f, "unloaded"),
            BridgeEvent::SurfaceReady { surface } => {
                write!(f, "surface_ready {:#x}", surface.raw())
            }
            BridgeEvent::Input {
                button_id,
                is_secondary_actor,
                is_press,
            } => write!(
                f,
                "input button={} player={} {}",
                button_id,
                if *is_secondary_actor { 2 } else { 1 },
                if *is_press { "push" } else { "release" }
            ),
            BridgeEvent::SessionActive { active } => write!(f, "session_active {active}"),
            BridgeEvent::CurrentTime { time } => write!(f, "current_time {time:.4}"),
            BridgeEvent::FrameTick { dt } => write!(f, "frame_tick {dt:.4}"),
            BridgeEvent::Lifecycle { kind } => write!(f, "lifecycle {kind:?}"),
        }
    }
}
