//! Raw input normalization.
//!
//! The host reports each button transition at two call sites. The
//! [`arbiter`] picks which site is authoritative for a given callback and the
//! [`classifier`] turns the raw triple into a [`NormalizedAction`] or drops it.

pub mod arbiter;
pub mod classifier;

use serde::{Deserialize, Serialize};

use crate::host::{Actor, Host};

pub use arbiter::HookStrategy;
pub use classifier::{
    classifier_for_site, classify, classify_game_layer, classify_player_object,
    resolve_secondary, Classifier,
};

/// Host button numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Jump,
    Left,
    Right,
    Other(u8),
}

impl Button {
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Button::Jump,
            2 => Button::Left,
            3 => Button::Right,
            other => Button::Other(other),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Button::Jump => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Other(id) => id,
        }
    }

    /// Left/right steering, only meaningful under platformer physics.
    pub fn is_steering(self) -> bool {
        matches!(self, Button::Left | Button::Right)
    }
}

/// Where in the host a button transition was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSite {
    /// The lower-level game-layer button handler.
    GameLayer,
    /// The player object's push/release entry points.
    PlayerObject,
}

/// A button transition as the host delivered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputSignal {
    pub button_id: u8,
    pub actor_is_primary: bool,
    pub is_press: bool,
}

impl RawInputSignal {
    pub fn new(button_id: u8, actor_is_primary: bool, is_press: bool) -> Self {
        Self {
            button_id,
            actor_is_primary,
            is_press,
        }
    }

    pub fn button(&self) -> Button {
        Button::from_id(self.button_id)
    }

    pub fn actor(&self) -> Actor {
        Actor::from_primary(self.actor_is_primary)
    }
}

/// The input event forwarded to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAction {
    pub button_id: u8,
    pub is_secondary_actor: bool,
    pub is_press: bool,
}

/// Mode flags read from the host for one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameModeContext {
    /// A gameplay session (not just the editor) is live.
    pub gameplay_live: bool,
    /// Two-player mode of the live level; false without one.
    pub two_player_mode_active: bool,
    /// Physics mode of the signal's actor; `None` without a gameplay session.
    pub actor_is_platformer: Option<bool>,
}

impl GameModeContext {
    /// Query the host for the context of an event from `actor`.
    pub fn capture<H: Host + ?Sized>(host: &H, actor: Actor) -> Self {
        if host.gameplay_session().is_none() {
            return Self::default();
        }
        Self {
            gameplay_live: true,
            two_player_mode_active: host.two_player_mode(),
            actor_is_platformer: Some(host.is_platformer(actor)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostImage, SessionHandle};

    struct Level {
        image: Option<HostImage>,
        two_player: bool,
        p1_platformer: bool,
        p2_platformer: bool,
    }

    impl Host for Level {
        fn gameplay_session(&self) -> Option<SessionHandle<'_>> {
            self.image.as_ref().map(HostImage::session)
        }
        fn editor_session_active(&self) -> bool {
            false
        }
        fn two_player_mode(&self) -> bool {
            self.two_player
        }
        fn is_platformer(&self, actor: Actor) -> bool {
            match actor {
                Actor::Primary => self.p1_platformer,
                Actor::Secondary => self.p2_platformer,
            }
        }
    }

    #[test]
    fn test_button_ids() {
        for id in 0..=u8::MAX {
            assert_eq!(Button::from_id(id).id(), id);
        }
        assert!(Button::Left.is_steering());
        assert!(Button::Right.is_steering());
        assert!(!Button::Jump.is_steering());
        assert!(!Button::Other(7).is_steering());
    }

    #[test]
    fn test_capture_without_gameplay() {
        let host = Level {
            image: None,
            two_player: true,
            p1_platformer: true,
            p2_platformer: true,
        };
        assert_eq!(
            GameModeContext::capture(&host, Actor::Primary),
            GameModeContext::default()
        );
    }

    #[test]
    fn test_capture_reads_actor_physics() {
        let host = Level {
            image: Some(HostImage::new()),
            two_player: true,
            p1_platformer: false,
            p2_platformer: true,
        };
        let p1 = GameModeContext::capture(&host, Actor::Primary);
        let p2 = GameModeContext::capture(&host, Actor::Secondary);
        assert!(p1.gameplay_live && p1.two_player_mode_active);
        assert_eq!(p1.actor_is_platformer, Some(false));
        assert_eq!(p2.actor_is_platformer, Some(true));
    }
}
