//! Scripted replay of host callbacks.
//!
//! A [`Script`] is a JSON list of host-side steps. [`run_script`] plays it
//! against a [`ScriptedHost`] whose session and window objects are real byte
//! images laid out per the configured [`HostLayout`], so the same layout reads
//! as in the live host are exercised.
//!
//! ```json
//! { "steps": [
//!     { "op": "enter_gameplay", "platformer": true },
//!     { "op": "set_time", "time": 1.25 },
//!     { "op": "button", "button": 1, "press": true },
//!     { "op": "quit" }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bridge::Bridge;
use crate::events::{BridgeEvent, Recorder};
use crate::host::{Actor, Host, HostImage, HostLayout, SessionHandle};
use crate::input::{InputSite, RawInputSignal};
use crate::types::{Error, Result};

// =============================================================================
// Scripted host
// =============================================================================

/// In-memory host driven by script steps.
#[derive(Debug, Clone)]
pub struct ScriptedHost {
    layout: HostLayout,
    gameplay: Option<HostImage>,
    editor: bool,
    two_player: bool,
    platformer: [bool; 2],
}

impl ScriptedHost {
    pub fn new(layout: HostLayout) -> Self {
        Self {
            layout,
            gameplay: None,
            editor: false,
            two_player: false,
            platformer: [false; 2],
        }
    }

    /// Construct a gameplay session with the given level settings.
    pub fn enter_gameplay(&mut self, platformer: bool, two_player: bool, player2_platformer: bool) {
        self.gameplay = Some(HostImage::new());
        self.two_player = two_player;
        self.platformer = [platformer, player2_platformer];
    }

    pub fn exit_gameplay(&mut self) {
        self.gameplay = None;
        self.two_player = false;
    }

    pub fn enter_editor(&mut self) {
        self.editor = true;
    }

    pub fn exit_editor(&mut self) {
        self.editor = false;
    }

    /// Store the elapsed level time in the live session object.
    pub fn set_time(&mut self, time: f64) -> Result<()> {
        let offset = self.layout.session_time_offset();
        let session = self
            .gameplay
            .as_mut()
            .ok_or_else(|| Error::validation("set_time without a gameplay session"))?;
        session.write_f64(offset, time)
    }
}

impl Host for ScriptedHost {
    fn gameplay_session(&self) -> Option<SessionHandle<'_>> {
        self.gameplay.as_ref().map(HostImage::session)
    }

    fn editor_session_active(&self) -> bool {
        self.editor
    }

    fn two_player_mode(&self) -> bool {
        self.two_player
    }

    fn is_platformer(&self, actor: Actor) -> bool {
        match actor {
            Actor::Primary => self.platformer[0],
            Actor::Secondary => self.platformer[1],
        }
    }
}

// =============================================================================
// Script format
// =============================================================================

const fn true_value() -> bool {
    true
}

/// One host-side step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    EnterGameplay {
        #[serde(default)]
        platformer: bool,
        #[serde(default)]
        two_player: bool,
        /// Defaults to `platformer`.
        #[serde(default)]
        player2_platformer: Option<bool>,
    },
    EnterEditor,
    ExitEditor,
    SetTime {
        time: f64,
    },
    SetToggles {
        #[serde(default)]
        alternate_hook: bool,
        #[serde(default)]
        force_secondary: bool,
    },
    /// A button transition. Without `site` the host reports it at both call
    /// sites, game layer first, as the live host does.
    Button {
        button: u8,
        #[serde(default = "true_value")]
        primary: bool,
        press: bool,
        #[serde(default)]
        site: Option<InputSite>,
    },
    Frame {
        dt: f32,
    },
    Present {
        /// Device context the host has stored in its window, if any yet.
        #[serde(default)]
        surface: Option<usize>,
    },
    Reset,
    Quit,
    Death {
        #[serde(default = "true_value")]
        primary: bool,
        #[serde(default = "true_value")]
        killed: bool,
    },
}

/// A replayable sequence of host steps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::SetTime { time } if !time.is_finite() => {
                    return Err(Error::validation(format!(
                        "step {index}: time must be finite"
                    )));
                }
                Step::Frame { dt } if !dt.is_finite() || *dt < 0.0 => {
                    return Err(Error::validation(format!(
                        "step {index}: dt must be finite and non-negative"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

// =============================================================================
// Runner
// =============================================================================

/// Play `script` through a fresh bridge and return every outbound event,
/// from `Loaded` to `Unloaded`.
pub fn run_script(script: &Script, layout: HostLayout) -> Result<Vec<BridgeEvent>> {
    let mut bridge = Bridge::new(ScriptedHost::new(layout), Recorder::new(), layout);
    let mut window = HostImage::new();

    for (index, step) in script.steps.iter().enumerate() {
        tracing::trace!("step {index}: {step:?}");
        apply_step(&mut bridge, &mut window, step)?;
    }

    bridge.teardown();
    Ok(bridge.consumer_mut().take())
}

fn apply_step(
    bridge: &mut Bridge<ScriptedHost, Recorder>,
    window: &mut HostImage,
    step: &Step,
) -> Result<()> {
    match *step {
        Step::EnterGameplay {
            platformer,
            two_player,
            player2_platformer,
        } => {
            bridge.on_gameplay_init(|host| {
                host.enter_gameplay(
                    platformer,
                    two_player,
                    player2_platformer.unwrap_or(platformer),
                )
            });
        }
        Step::EnterEditor => bridge.on_editor_init(ScriptedHost::enter_editor),
        Step::ExitEditor => bridge.on_editor_exit(ScriptedHost::exit_editor),
        Step::SetTime { time } => bridge.host_mut().set_time(time)?,
        Step::SetToggles {
            alternate_hook,
            force_secondary,
        } => {
            let recorder = bridge.consumer_mut();
            recorder.use_alternate_hook = alternate_hook;
            recorder.force_secondary = force_secondary;
        }
        Step::Button {
            button,
            primary,
            press,
            site,
        } => {
            let raw = RawInputSignal::new(button, primary, press);
            match site {
                Some(InputSite::GameLayer) => bridge.on_game_layer_button(raw, |_| ()),
                Some(InputSite::PlayerObject) => bridge.on_player_button(raw, |_| ()),
                None => {
                    bridge.on_game_layer_button(raw, |_| ());
                    bridge.on_player_button(raw, |_| ());
                }
            }
        }
        Step::Frame { dt } => bridge.on_frame_update(dt, |_| ()),
        Step::Present { surface } => {
            if let Some(surface) = surface {
                window.write_usize(bridge.layout().window_surface_offset(), surface)?;
            }
            bridge.on_frame_presented(Some(window.window()), |_| ());
        }
        Step::Reset => bridge.on_level_reset(|_| ()),
        Step::Quit => bridge.on_level_quit(ScriptedHost::exit_gameplay),
        Step::Death { primary, killed } => {
            bridge.on_actor_destroyed(Actor::from_primary(primary), |_| killed);
        }
    }
    Ok(())
}
