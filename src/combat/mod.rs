use crate::models::*;
use avian3d::prelude::LinearVelocity;
use bevy::prelude::*;
use std::time::Duration;
use tail_sweep_shared::combat::THROW_STRENGTH;

mod activation;
mod components;
mod damage;
pub mod events;
mod feedback;
mod sound;
mod status;
mod sweep;

pub use activation::TailSweepActivation;
pub use components::*;
pub use events::*;
pub use sound::*;

pub fn plugin(app: &mut App) {
    app.add_plugins((
        components::plugin,
        activation::plugin,
        damage::plugin,
        status::plugin,
        sweep::plugin,
        feedback::plugin,
        sound::plugin,
    ));
}
