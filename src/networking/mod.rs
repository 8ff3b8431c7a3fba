//! Sweep session replication.
//!
//! The authoritative side collects a delta for every session that turned or
//! ended this tick. The transport drains [`SweepOutbox`], ships the encoded
//! deltas, and the observer side feeds them to [`apply_sweep_delta`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tail_sweep_shared::SweepSession;

use crate::combat::Sweeping;
use crate::models::{NetId, Role, SweepSystems};

pub fn plugin(app: &mut App) {
    app.init_resource::<SweepOutbox>().add_systems(
        FixedUpdate,
        collect_sweep_deltas
            .in_set(SweepSystems::Replicate)
            .run_if(resource_equals(Role::Authoritative)),
    );
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SweepDelta {
    Updated { id: NetId, session: SweepSession },
    Removed { id: NetId },
}

impl SweepDelta {
    pub fn id(&self) -> NetId {
        match self {
            SweepDelta::Updated { id, .. } | SweepDelta::Removed { id } => *id,
        }
    }

    pub fn encode(&self) -> Result<String, ron::Error> {
        ron::to_string(self)
    }

    pub fn decode(blob: &str) -> Result<Self, ron::de::SpannedError> {
        ron::from_str(blob)
    }
}

/// Deltas waiting to be sent, oldest first.
#[derive(Resource, Default, Debug)]
pub struct SweepOutbox(Vec<SweepDelta>);

impl SweepOutbox {
    pub fn drain(&mut self) -> Vec<SweepDelta> {
        std::mem::take(&mut self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn collect_sweep_deltas(
    changed: Query<(&NetId, &Sweeping), Changed<Sweeping>>,
    mut removed: RemovedComponents<Sweeping>,
    ids: Query<&NetId>,
    mut outbox: ResMut<SweepOutbox>,
) {
    for (id, sweeping) in changed.iter() {
        outbox.0.push(SweepDelta::Updated {
            id: *id,
            session: sweeping.0.clone(),
        });
    }

    for entity in removed.read() {
        // despawned entities have nothing left to mirror
        if let Ok(id) = ids.get(entity) {
            outbox.0.push(SweepDelta::Removed { id: *id });
        }
    }
}

/// Mirror one delta into `world`. Returns false if no entity carries the id.
pub fn apply_sweep_delta(world: &mut World, delta: &SweepDelta) -> bool {
    let id = delta.id();
    let mut query = world.query::<(Entity, &NetId)>();
    let Some(entity) = query
        .iter(world)
        .find_map(|(entity, net_id)| (*net_id == id).then_some(entity))
    else {
        debug!("Dropping sweep delta for unknown {id:?}");
        return false;
    };

    let mut entity = world.entity_mut(entity);
    match delta {
        SweepDelta::Updated { session, .. } => {
            entity.insert(Sweeping(session.clone()));
        }
        SweepDelta::Removed { .. } => {
            entity.remove::<Sweeping>();
        }
    }
    true
}
