use super::*;
use tail_sweep_shared::combat::throw_duration;

pub fn plugin(app: &mut App) {
    app.add_observer(on_damage).add_observer(on_death);
}

/// Observer: apply damage, throw, knockdown and stun when [`DamageDealt`] is triggered.
///
/// Each hit stands alone. A target that is already gone is skipped.
fn on_damage(
    on: On<DamageDealt>,
    mut targets: Query<Option<&mut Health>>,
    mut commands: Commands,
) {
    let event = on.event();

    let Ok(health) = targets.get_mut(event.target) else {
        return;
    };

    let died = match (event.damage, health) {
        (Some(amount), Some(mut health)) => health.take_damage(amount),
        _ => false,
    };

    let mut target = commands.entity(event.target);
    if event.throw.length_squared() > 0.0001 {
        let velocity = event.throw.normalize() * THROW_STRENGTH;
        let flight = throw_duration(event.throw.planar(), THROW_STRENGTH);
        target.try_insert((Thrown::new(flight), LinearVelocity(velocity)));
    }

    // refresh, not stack
    target.try_insert((KnockedDown::new(event.stun), Stunned::new(event.stun)));

    commands.trigger(HitLanded {
        source: event.source,
        target: event.target,
    });

    if died {
        commands.trigger(Died {
            killer: event.source,
            entity: event.target,
        });
    }
}

/// Observer: handle entity death.
fn on_death(on: On<Died>, mut commands: Commands) {
    let event = on.event();
    info!("{} killed by {}", event.entity, event.killer);
    commands.entity(event.entity).try_despawn();
}
