//! Sweep session state machine.
//!
//! A session lives on the sweeping entity from activation until the tick
//! after its last quarter turn. Each tick either waits, rotates once, or
//! reports that the session is done and should be removed.

use crate::direction::{Direction, QUARTER_TURN};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepSession {
    /// Simulation time at which the next quarter turn may happen.
    pub next_rotation: Duration,
    pub total_rotations: u32,
    pub max_rotations: u32,
    pub delay: Duration,
    /// Set from the entity's facing on the first turn, then only advanced.
    pub last_direction: Option<Direction>,
}

/// What a single tick did to a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SweepStep {
    /// Not due yet, nothing changed.
    Waiting,
    /// All turns are spent. The owner removes the session.
    Finished,
    /// One quarter turn happened. `angle` is the unwrapped target facing.
    Rotated { angle: f32 },
}

impl SweepSession {
    pub fn new(max_rotations: u32, delay: Duration) -> Self {
        Self {
            next_rotation: Duration::ZERO,
            total_rotations: 0,
            max_rotations,
            delay,
            last_direction: None,
        }
    }

    /// Advance the session at simulation time `now`.
    ///
    /// `facing` is only consulted on the first turn, to seed `last_direction`
    /// from the entity's current world rotation.
    pub fn step(&mut self, now: Duration, facing: impl FnOnce() -> f32) -> SweepStep {
        if now < self.next_rotation {
            return SweepStep::Waiting;
        }

        if self.is_exhausted() {
            return SweepStep::Finished;
        }

        self.total_rotations += 1;
        self.next_rotation = now + self.delay;

        let current = *self
            .last_direction
            .get_or_insert_with(|| Direction::from_angle(facing()));
        let angle = current.to_angle() + QUARTER_TURN;
        self.last_direction = Some(Direction::from_angle(angle));

        SweepStep::Rotated { angle }
    }

    /// Facing to hold between ticks, if the sweep has started turning.
    pub fn frame_angle(&self) -> Option<f32> {
        self.last_direction.map(Direction::to_angle)
    }

    pub fn is_exhausted(&self) -> bool {
        self.total_rotations >= self.max_rotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::{angle_distance, normalize_angle};
    use std::f32::consts::{PI, TAU};

    const EPS: f32 = 1e-4;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn new_session_fires_immediately() {
        let mut session = SweepSession::new(4, ms(500));
        let step = session.step(Duration::ZERO, || 0.0);
        assert!(matches!(step, SweepStep::Rotated { .. }));
        assert_eq!(session.total_rotations, 1);
        assert_eq!(session.next_rotation, ms(500));
    }

    #[test]
    fn waits_until_next_rotation() {
        let mut session = SweepSession::new(4, ms(500));
        session.step(Duration::ZERO, || 0.0);
        let before = session.clone();

        assert_eq!(session.step(ms(499), || 0.0), SweepStep::Waiting);
        assert_eq!(session, before);
    }

    #[test]
    fn four_turns_then_finished() {
        let mut session = SweepSession::new(4, ms(500));
        let mut angles = Vec::new();

        for tick in 0..4 {
            let now = ms(500 * tick);
            match session.step(now, || 0.0) {
                SweepStep::Rotated { angle } => angles.push(angle),
                other => panic!("tick {tick}: expected rotation, got {other:?}"),
            }
            assert_eq!(session.total_rotations, tick as u32 + 1);
            assert_eq!(session.next_rotation, now + ms(500));
        }

        assert!(session.is_exhausted());
        assert_eq!(session.step(ms(2000), || 0.0), SweepStep::Finished);
        assert_eq!(session.total_rotations, 4);

        let expected = [PI / 2.0, PI, 3.0 * PI / 2.0, 0.0];
        for (angle, want) in angles.iter().zip(expected) {
            assert!(
                angle_distance(*angle, want) < EPS,
                "angle {angle} != {want}"
            );
        }
    }

    #[test]
    fn finished_does_not_fire_before_delay_elapses() {
        let mut session = SweepSession::new(1, ms(500));
        session.step(Duration::ZERO, || 0.0);
        assert_eq!(session.step(ms(100), || 0.0), SweepStep::Waiting);
        assert_eq!(session.step(ms(500), || 0.0), SweepStep::Finished);
    }

    #[test]
    fn seeds_direction_from_facing_once() {
        let mut session = SweepSession::new(3, Duration::ZERO);
        let mut calls = 0;
        session.step(Duration::ZERO, || {
            calls += 1;
            PI
        });
        session.step(Duration::ZERO, || {
            calls += 1;
            0.0
        });
        assert_eq!(calls, 1);
        // North, then two quarter turns
        assert_eq!(session.last_direction, Some(Direction::South));
    }

    #[test]
    fn relative_facing_advances_a_quarter_turn_per_step() {
        let start = Direction::NorthEast.to_angle();
        let mut session = SweepSession::new(8, Duration::ZERO);
        for n in 1..=8u32 {
            let SweepStep::Rotated { angle } = session.step(Duration::ZERO, || start) else {
                panic!("expected rotation");
            };
            let relative = normalize_angle(angle - start);
            let want = normalize_angle(n as f32 * QUARTER_TURN);
            assert!(angle_distance(relative, want) < EPS);
            assert!(angle_distance(session.frame_angle().unwrap_or(TAU), angle) < EPS);
        }
    }

    #[test]
    fn zero_rotations_finishes_without_turning() {
        let mut session = SweepSession::new(0, ms(100));
        assert_eq!(session.step(Duration::ZERO, || 0.0), SweepStep::Finished);
        assert_eq!(session.last_direction, None);
        assert_eq!(session.frame_angle(), None);
    }
}
