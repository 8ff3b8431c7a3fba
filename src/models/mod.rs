use bevy::prelude::*;
use serde::{Deserialize, Serialize};

mod ext_traits;
mod settings;

pub use ext_traits::*;
pub use settings::*;

pub fn plugin(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SweepSystems::Status,
            SweepSystems::Animate,
            SweepSystems::Replicate,
        )
            .chain(),
    );

    app.register_type::<Role>()
        .register_type::<NetId>()
        .add_plugins(settings::plugin);
}

/// High-level groupings of systems in the [`FixedUpdate`] schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum SweepSystems {
    /// Tick stun, knockdown and throw timers.
    Status,
    /// Advance sweep sessions.
    Animate,
    /// Collect replication deltas.
    Replicate,
}

/// Which side of the network this app is running on.
///
/// Only the authoritative side resolves hits. Both sides animate.
#[derive(Resource, Reflect, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Resource)]
pub enum Role {
    #[default]
    Authoritative,
    Observer,
}

impl Role {
    pub fn is_authoritative(self) -> bool {
        self == Role::Authoritative
    }
}

/// Stable identity shared by the authoritative and observer copies of an entity.
#[derive(Component, Reflect, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[reflect(Component)]
pub struct NetId(pub u64);
