//! Host adaptor seam.
//!
//! The hooking shim implements [`Host`] over the running game; the bridge only
//! ever asks it the questions below, fresh on every callback.

pub mod layout;

use serde::{Deserialize, Serialize};

pub use layout::{HostImage, HostLayout, SessionHandle, SurfaceHandle, WindowHandle};

/// Player entity within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Primary,
    Secondary,
}

impl Actor {
    pub fn from_primary(is_primary: bool) -> Self {
        if is_primary {
            Actor::Primary
        } else {
            Actor::Secondary
        }
    }

    pub fn is_primary(self) -> bool {
        self == Actor::Primary
    }
}

/// Read-only view of the host's current state.
pub trait Host {
    /// The live gameplay session, if one exists.
    fn gameplay_session(&self) -> Option<SessionHandle<'_>>;

    /// Whether an editor session exists.
    fn editor_session_active(&self) -> bool;

    /// Two-player mode of the live gameplay session's level settings.
    fn two_player_mode(&self) -> bool;

    /// Whether `actor` in the live gameplay session uses platformer physics.
    fn is_platformer(&self, actor: Actor) -> bool;

    /// True while either a gameplay or an editor session exists.
    fn has_session(&self) -> bool {
        self.gameplay_session().is_some() || self.editor_session_active()
    }
}
