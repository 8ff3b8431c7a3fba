//! Tail sweep event definitions.
//!
//! Sweep chain:   [`TailSweepAction`] → [`TailSweepResolved`] + [`DamageDealt`] per target
//! Hit chain:     [`DamageDealt`] → [`HitLanded`], [`Died`]
//!
//! Convention: intents use noun form (hasn't happened yet), mutations/feedback
//! use past tense (it happened).

use bevy::prelude::*;
use std::time::Duration;

// ── Intent ──────────────────────────────────────────────────────────

/// Intent: the xeno pressed its tail sweep action.
#[derive(Event, Clone, Debug)]
pub struct TailSweepAction {
    pub xeno: Entity,
}

// ── Outcome ─────────────────────────────────────────────────────────

/// What happened to an activation request.
///
/// `handled` means the cost was paid and the sweep started.
/// `cancelled` means the attempt pre-check refused it.
/// Both false means it failed for another reason (no plasma, no transform).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivationOutcome {
    pub handled: bool,
    pub cancelled: bool,
}

impl ActivationOutcome {
    pub const HANDLED: Self = Self {
        handled: true,
        cancelled: false,
    };
    pub const CANCELLED: Self = Self {
        handled: false,
        cancelled: true,
    };
    pub const FAILED: Self = Self {
        handled: false,
        cancelled: false,
    };
}

/// Outcome of a [`TailSweepAction`], published once per request.
#[derive(Event, Clone, Debug)]
pub struct TailSweepResolved {
    pub xeno: Entity,
    pub outcome: ActivationOutcome,
}

/// The xeno could not pay for the sweep. The UI shows a popup.
#[derive(Event, Clone, Debug)]
pub struct PlasmaPopup {
    pub xeno: Entity,
    pub cost: f32,
    pub available: f32,
}

// ── Mutations ───────────────────────────────────────────────────────

/// Mutation: the sweep connected with a target.
/// Triggers [`HitLanded`] and potentially [`Died`].
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub source: Entity,
    pub target: Entity,
    pub damage: Option<f32>,
    /// Throw offset on the ground plane. Zero means no throw.
    pub throw: Vec3,
    pub stun: Duration,
}

/// Mutation: an entity's health reached zero.
#[derive(Event, Debug, Clone)]
pub struct Died {
    pub killer: Entity,
    pub entity: Entity,
}

// ── Feedback ────────────────────────────────────────────────────────

/// Feedback: a hit landed. Play the hit sound, flash, spawn the hit effect.
#[derive(Event, Debug, Clone)]
pub struct HitLanded {
    pub source: Entity,
    pub target: Entity,
}
