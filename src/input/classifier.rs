//! Actor resolution and validity filtering for raw button transitions.
//!
//! Rules:
//!   secondary actor  = not primary AND gameplay live AND (two-player OR forced)
//!   player-object    → always forwarded
//!   game-layer       → steering buttons dropped unless the actor is platformer

use super::{GameModeContext, InputSite, NormalizedAction, RawInputSignal};

/// Whether the event should be attributed to the secondary actor.
///
/// `force_secondary` is only consulted for a non-primary actor outside
/// two-player mode.
pub fn resolve_secondary(
    actor_is_primary: bool,
    ctx: &GameModeContext,
    force_secondary: &mut dyn FnMut() -> bool,
) -> bool {
    !actor_is_primary && ctx.gameplay_live && (ctx.two_player_mode_active || force_secondary())
}

/// Player-object call site: no mode gating.
pub fn classify_player_object(
    raw: RawInputSignal,
    ctx: &GameModeContext,
    force_secondary: &mut dyn FnMut() -> bool,
) -> Option<NormalizedAction> {
    Some(NormalizedAction {
        button_id: raw.button_id,
        is_secondary_actor: resolve_secondary(raw.actor_is_primary, ctx, force_secondary),
        is_press: raw.is_press,
    })
}

/// Game-layer call site: steering outside platformer physics is dropped.
pub fn classify_game_layer(
    raw: RawInputSignal,
    ctx: &GameModeContext,
    force_secondary: &mut dyn FnMut() -> bool,
) -> Option<NormalizedAction> {
    if raw.button().is_steering() && ctx.actor_is_platformer == Some(false) {
        tracing::trace!(
            "filtered steering button {} for non-platformer {:?}",
            raw.button_id,
            raw.actor()
        );
        return None;
    }
    classify_player_object(raw, ctx, force_secondary)
}

/// One of the two per-site classification functions.
pub type Classifier =
    fn(RawInputSignal, &GameModeContext, &mut dyn FnMut() -> bool) -> Option<NormalizedAction>;

/// The classifier carrying the rules of `site`.
pub fn classifier_for_site(site: InputSite) -> Classifier {
    match site {
        InputSite::GameLayer => classify_game_layer,
        InputSite::PlayerObject => classify_player_object,
    }
}

/// Classify `raw` with the rules of `site`.
pub fn classify(
    site: InputSite,
    raw: RawInputSignal,
    ctx: &GameModeContext,
    force_secondary: &mut dyn FnMut() -> bool,
) -> Option<NormalizedAction> {
    classifier_for_site(site)(raw, ctx, force_secondary)
}
