use super::*;
use tail_sweep_shared::SweepStep;
use tail_sweep_shared::direction::angle_distance;

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, tick_sweeping.in_set(SweepSystems::Animate))
        .add_systems(Update, hold_sweep_facing);
}

/// Turn `transform` to `angle` unless the entity is rotation locked.
/// Already facing `angle` leaves the transform unchanged.
fn try_face_angle(mut transform: Mut<Transform>, angle: f32, locked: bool) {
    if locked || angle_distance(transform.yaw(), angle) < 1e-4 {
        return;
    }
    transform.face_yaw(angle);
}

/// One quarter turn per due session per tick. Sessions that spent all their
/// turns are removed once their last delay has passed.
fn tick_sweeping(
    time: Res<Time>,
    mut sweepers: Query<(Entity, &mut Sweeping, &mut Transform, Has<RotationLocked>)>,
    mut commands: Commands,
) {
    let now = time.elapsed();
    for (entity, mut sweeping, transform, locked) in sweepers.iter_mut() {
        let facing = transform.yaw();
        // only real turns count as a change for replication
        match sweeping.bypass_change_detection().step(now, || facing) {
            SweepStep::Waiting => {}
            SweepStep::Finished => {
                debug!("Sweep on {entity} finished");
                commands.entity(entity).try_remove::<Sweeping>();
            }
            SweepStep::Rotated { angle } => {
                sweeping.set_changed();
                try_face_angle(transform, angle, locked);
            }
        }
    }
}

/// Hold the last turned-to facing between ticks. Never touches the session.
fn hold_sweep_facing(mut sweepers: Query<(&Sweeping, &mut Transform, Has<RotationLocked>)>) {
    for (sweeping, transform, locked) in sweepers.iter_mut() {
        let Some(angle) = sweeping.frame_angle() else {
            continue;
        };
        try_face_angle(transform, angle, locked);
    }
}
