//! Tail sweep: a spinning melee ability for xenos.
//!
//! [`plugin`] wires up everything the ability needs. The host app provides
//! [`Time`](bevy::prelude::Time), runs [`FixedUpdate`](bevy::prelude::FixedUpdate)
//! for the simulation, and [`Update`](bevy::prelude::Update) for presentation.

use bevy::prelude::*;

pub mod combat;
pub mod models;
pub mod networking;

// the order is important: models inserts the resources the rest reads
pub fn plugin(app: &mut App) {
    app.add_plugins((models::plugin, combat::plugin, networking::plugin));
}
