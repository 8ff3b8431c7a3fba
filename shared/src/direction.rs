//! Eight-way facing directions and angle conversion.
//!
//! Angles are radians around the vertical axis. `South` sits at zero and
//! every following variant is another 45° turn.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_4, TAU};

/// A quarter turn, the size of one sweep step.
pub const QUARTER_TURN: f32 = std::f32::consts::FRAC_PI_2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    South,
    SouthEast,
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::South,
        Direction::SouthEast,
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
    ];

    /// Snap an arbitrary angle to the nearest of the eight directions.
    pub fn from_angle(radians: f32) -> Self {
        let angle = normalize_angle(radians);
        let sector = (angle / FRAC_PI_4).round() as usize % Self::ALL.len();
        Self::ALL[sector]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn to_angle(self) -> f32 {
        self.index() as f32 * FRAC_PI_4
    }
}

/// Wrap an angle into `[0, TAU)`.
pub fn normalize_angle(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can land exactly on TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two angles.
pub fn angle_distance(a: f32, b: f32) -> f32 {
    let diff = normalize_angle(a - b);
    diff.min(TAU - diff)
}
