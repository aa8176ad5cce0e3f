//! Replay integration tests — JSON scripts through `run_script`.

use clickbridge::events::{BridgeEvent, LifecycleEvent};
use clickbridge::replay::{run_script, Script};
use clickbridge::{Config, HostLayout};
use pretty_assertions::assert_eq;
use std::io::Write;

fn lifecycle(kind: LifecycleEvent) -> BridgeEvent {
    BridgeEvent::Lifecycle { kind }
}

#[test]
fn test_full_level_session() {
    let script = Script::from_json(
        r#"{"steps":[
            {"op":"present"},
            {"op":"present","surface":4096},
            {"op":"enter_gameplay","platformer":true},
            {"op":"frame","dt":0.25},
            {"op":"set_time","time":0.5},
            {"op":"button","button":1,"press":true},
            {"op":"button","button":1,"press":false},
            {"op":"death"},
            {"op":"reset"},
            {"op":"quit"}
        ]}"#,
    )
    .unwrap();

    let events = run_script(&script, HostLayout::DEFAULT).unwrap();

    assert_eq!(
        events,
        vec![
            BridgeEvent::Loaded,
            BridgeEvent::SurfaceReady {
                surface: clickbridge::host::SurfaceHandle::new(4096).unwrap()
            },
            lifecycle(LifecycleEvent::LevelInit),
            BridgeEvent::SessionActive { active: true },
            BridgeEvent::FrameTick { dt: 0.25 },
            BridgeEvent::CurrentTime { time: 0.0 },
            BridgeEvent::SessionActive { active: true },
            BridgeEvent::CurrentTime { time: 0.5 },
            BridgeEvent::Input {
                button_id: 1,
                is_secondary_actor: false,
                is_press: true
            },
            BridgeEvent::SessionActive { active: true },
            BridgeEvent::CurrentTime { time: 0.5 },
            BridgeEvent::Input {
                button_id: 1,
                is_secondary_actor: false,
                is_press: false
            },
            lifecycle(LifecycleEvent::PlayerDeath),
            lifecycle(LifecycleEvent::LevelReset),
            lifecycle(LifecycleEvent::LevelQuit),
            BridgeEvent::SessionActive { active: false },
            BridgeEvent::Unloaded,
        ]
    );
}

#[test]
fn test_explicit_site_respects_arbitration() {
    // Game-layer reports are ignored while the alternate hook is on.
    let script = Script::from_json(
        r#"{"steps":[
            {"op":"enter_gameplay","platformer":false},
            {"op":"set_toggles","alternate_hook":true},
            {"op":"button","button":2,"press":true,"site":"game_layer"},
            {"op":"button","button":2,"press":true,"site":"player_object"}
        ]}"#,
    )
    .unwrap();

    let events = run_script(&script, HostLayout::DEFAULT).unwrap();
    let inputs: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, BridgeEvent::Input { .. }))
        .collect();
    assert_eq!(
        inputs,
        vec![&BridgeEvent::Input {
            button_id: 2,
            is_secondary_actor: false,
            is_press: true
        }]
    );
}

#[test]
fn test_two_player_level_with_mixed_physics() {
    let script = Script::from_json(
        r#"{"steps":[
            {"op":"enter_gameplay","platformer":false,"two_player":true,"player2_platformer":true},
            {"op":"button","button":3,"primary":true,"press":true},
            {"op":"button","button":3,"primary":false,"press":true}
        ]}"#,
    )
    .unwrap();

    let events = run_script(&script, HostLayout::DEFAULT).unwrap();
    let inputs: Vec<_> = events
        .into_iter()
        .filter(|event| matches!(event, BridgeEvent::Input { .. }))
        .collect();
    assert_eq!(
        inputs,
        vec![BridgeEvent::Input {
            button_id: 3,
            is_secondary_actor: true,
            is_press: true
        }]
    );
}

#[test]
fn test_script_and_config_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_create(dir.path()).unwrap();

    let mut script_file = tempfile::NamedTempFile::new_in(dir.path()).unwrap();
    write!(
        script_file,
        r#"{{"steps":[{{"op":"enter_editor"}},{{"op":"exit_editor"}}]}}"#
    )
    .unwrap();

    let script = Script::from_file(script_file.path()).unwrap();
    let events = run_script(&script, config.layout().unwrap()).unwrap();
    assert_eq!(
        events,
        vec![
            BridgeEvent::Loaded,
            lifecycle(LifecycleEvent::LevelInit),
            BridgeEvent::Unloaded,
        ]
    );
}

#[test]
fn test_events_serialize_as_json_lines() {
    let script = Script::from_json(r#"{"steps":[{"op":"enter_gameplay"},{"op":"reset"}]}"#).unwrap();
    let lines: Vec<String> = run_script(&script, HostLayout::DEFAULT)
        .unwrap()
        .iter()
        .map(|event| serde_json::to_string(event).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![
            r#"{"event":"loaded"}"#,
            r#"{"event":"lifecycle","kind":"level_init"}"#,
            r#"{"event":"lifecycle","kind":"level_reset"}"#,
            r#"{"event":"unloaded"}"#,
        ]
    );
}
