use bevy::prelude::*;
use std::time::Duration;
use tail_sweep_shared::SweepSession;
use tail_sweep_shared::combat::defaults;

pub fn plugin(app: &mut App) {
    app.register_type::<Health>()
        .register_type::<Plasma>()
        .register_type::<TailSweep>()
        .register_type::<Stunned>()
        .register_type::<KnockedDown>()
        .register_type::<Thrown>()
        .register_type::<ColorFlash>()
        .register_type::<HitEffect>();
}

/// Health component for any entity that can take damage.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.current = (self.current - amount).max(0.0);
        self.current <= 0.0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(defaults::MARINE_HEALTH)
    }
}

/// Resource pool xeno abilities are paid from.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct Plasma {
    pub current: f32,
    pub max: f32,
}

impl Plasma {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Deduct `cost` if the pool can cover it. Leaves the pool untouched otherwise.
    pub fn try_remove(&mut self, cost: f32) -> bool {
        if self.current < cost {
            return false;
        }
        self.current -= cost;
        true
    }
}

/// Tail sweep ability tuning carried by the xeno that owns it.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct TailSweep {
    pub plasma_cost: f32,
    pub damage: Option<f32>,
    /// Throws are scaled by `range / 3`.
    pub range: f32,
    pub stun_time: Duration,
    pub max_rotations: u32,
    pub rotation_delay: Duration,
    pub sound: String,
    pub hit_sound: String,
    pub hit_effect: String,
}

impl Default for TailSweep {
    fn default() -> Self {
        Self {
            plasma_cost: defaults::PLASMA_COST,
            damage: Some(defaults::DAMAGE),
            range: defaults::RANGE,
            stun_time: Duration::from_secs_f32(defaults::STUN_SECS),
            max_rotations: defaults::MAX_ROTATIONS,
            rotation_delay: Duration::from_secs_f32(defaults::ROTATION_DELAY_SECS),
            sound: "audio/xeno/tail_swipe.ogg".into(),
            hit_sound: "audio/weapons/alien_claw_block.ogg".into(),
            hit_effect: "effects/tail_sweep_hit".into(),
        }
    }
}

/// In-progress sweep animation. Present only while the sweep is turning.
#[derive(Component, Debug, Clone, PartialEq, Deref, DerefMut)]
pub struct Sweeping(pub SweepSession);

impl Sweeping {
    pub fn from_ability(ability: &TailSweep) -> Self {
        Self(SweepSession::new(ability.max_rotations, ability.rotation_delay))
    }
}

/// Tag for entities that can use xeno abilities.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct Xeno;

/// Tag for entities a tail sweep can hit.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct Marine;

/// Resting xenos cannot sweep.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct Resting;

/// Fortified xenos cannot sweep.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct Fortified;

/// Entities with this tag ignore facing requests.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct RotationLocked;

#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct Stunned {
    pub timer: Timer,
}

impl Stunned {
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
        }
    }
}

#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct KnockedDown {
    pub timer: Timer,
}

impl KnockedDown {
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
        }
    }
}

/// Entity is in flight after a throw. Velocity is cleared when the timer ends.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct Thrown {
    pub flight: Timer,
}

impl Thrown {
    pub fn new(seconds: f32) -> Self {
        Self {
            flight: Timer::from_seconds(seconds.max(0.0), TimerMode::Once),
        }
    }
}

/// Short tint on a hit entity, for the renderer to pick up.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct ColorFlash {
    pub color: Color,
    pub timer: Timer,
}

/// Hit effect spawned as a child of the entity it belongs to.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct HitEffect {
    pub id: String,
    pub lifetime: Timer,
}
