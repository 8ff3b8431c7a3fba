use super::*;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (tick_stuns, tick_knockdowns, tick_throws).in_set(SweepSystems::Status),
    );
}

fn tick_stuns(time: Res<Time>, mut query: Query<(Entity, &mut Stunned)>, mut commands: Commands) {
    for (entity, mut stunned) in query.iter_mut() {
        if stunned.timer.tick(time.delta()).is_finished() {
            commands.entity(entity).try_remove::<Stunned>();
        }
    }
}

fn tick_knockdowns(
    time: Res<Time>,
    mut query: Query<(Entity, &mut KnockedDown)>,
    mut commands: Commands,
) {
    for (entity, mut knocked) in query.iter_mut() {
        if knocked.timer.tick(time.delta()).is_finished() {
            commands.entity(entity).try_remove::<KnockedDown>();
        }
    }
}

/// Land thrown entities once their flight time is up.
fn tick_throws(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Thrown, Option<&mut LinearVelocity>)>,
    mut commands: Commands,
) {
    for (entity, mut thrown, velocity) in query.iter_mut() {
        if !thrown.flight.tick(time.delta()).is_finished() {
            continue;
        }
        if let Some(mut velocity) = velocity {
            velocity.0 = Vec3::ZERO;
        }
        commands.entity(entity).try_remove::<Thrown>();
    }
}
