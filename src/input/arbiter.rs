//! Call-site arbitration.
//!
//! Both host call sites may fire for the same physical transition. The
//! consumer's `use_alternate_hook` toggle picks the authoritative one for each
//! callback; the other site forwards to the host untouched.
//!
//! The toggle is read per callback, never cached. If it flips between a press
//! and its release, the release is classified by whichever site is now
//! authoritative; no matching state reconciles the pair.

use super::classifier::{classifier_for_site, Classifier};
use super::InputSite;

/// Which call site classifies input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookStrategy {
    /// Default: the game-layer handler classifies.
    GameLayer,
    /// Alternate hook: the player object classifies.
    PlayerObject,
}

impl HookStrategy {
    pub fn select(use_alternate_hook: bool) -> Self {
        if use_alternate_hook {
            HookStrategy::PlayerObject
        } else {
            HookStrategy::GameLayer
        }
    }

    pub fn authoritative_site(self) -> InputSite {
        match self {
            HookStrategy::GameLayer => InputSite::GameLayer,
            HookStrategy::PlayerObject => InputSite::PlayerObject,
        }
    }

    /// The classifier `site` must run, or `None` if it is a pass-through.
    pub fn classifier_for(self, site: InputSite) -> Option<Classifier> {
        if site != self.authoritative_site() {
            return None;
        }
        Some(classifier_for_site(site))
    }
}
