//! Shared sweep combat logic: constants, hit detection, throw geometry.

use glam::Vec2;

/// Default tail sweep tuning. Single source of truth for both roles.
pub mod defaults {
    pub const PLASMA_COST: f32 = 10.0;
    pub const PLASMA_MAX: f32 = 200.0;
    pub const DAMAGE: f32 = 15.0;
    pub const RANGE: f32 = 3.0;
    pub const STUN_SECS: f32 = 1.0;
    pub const MAX_ROTATIONS: u32 = 4;
    pub const ROTATION_DELAY_SECS: f32 = 0.1;
    pub const MARINE_HEALTH: f32 = 100.0;
}

/// Targets farther than this from the sweeping entity are untouched.
pub const SWEEP_RADIUS: f32 = 1.5;

/// Speed at which swept targets are thrown.
pub const THROW_STRENGTH: f32 = 5.0;

/// The configured range is divided by this to scale the throw offset.
pub const THROW_RANGE_DIVISOR: f32 = 3.0;

/// Range check on the XZ plane, inclusive of the edge.
pub fn within_sweep(origin: Vec2, target: Vec2, radius: f32) -> bool {
    origin.distance_squared(target) <= radius * radius
}

/// Offset a target is thrown along: its displacement from the sweeper,
/// scaled by `range / THROW_RANGE_DIVISOR`.
pub fn throw_offset(origin: Vec2, target: Vec2, range: f32) -> Vec2 {
    (target - origin) * (range / THROW_RANGE_DIVISOR)
}

/// Seconds a throw of `offset` lasts at `strength` units per second.
pub fn throw_duration(offset: Vec2, strength: f32) -> f32 {
    if strength <= 0.0 {
        return 0.0;
    }
    offset.length() / strength
}

/// A candidate for the sweep, identified by whatever the caller uses.
#[derive(Clone, Copy, Debug)]
pub struct SweepTarget<Id> {
    pub id: Id,
    pub pos: Vec2,
}

/// A target the sweep connected with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit<Id> {
    pub id: Id,
    pub throw: Vec2,
}

/// Pick every target inside [`SWEEP_RADIUS`] and compute its throw.
/// Order follows the input; callers must not rely on it.
pub fn resolve_sweep<Id: Copy>(
    origin: Vec2,
    range: f32,
    targets: impl IntoIterator<Item = SweepTarget<Id>>,
) -> Vec<SweepHit<Id>> {
    targets
        .into_iter()
        .filter(|t| within_sweep(origin, t.pos, SWEEP_RADIUS))
        .map(|t| SweepHit {
            id: t.id,
            throw: throw_offset(origin, t.pos, range),
        })
        .collect()
}
