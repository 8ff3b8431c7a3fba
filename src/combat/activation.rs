use super::*;
use bevy::ecs::system::SystemParam;
use tail_sweep_shared::combat::{SweepTarget, resolve_sweep};

pub fn plugin(app: &mut App) {
    app.add_observer(on_tail_sweep_action);
}

/// Everything a tail sweep activation reads or writes.
#[derive(SystemParam)]
pub struct TailSweepActivation<'w, 's> {
    role: Res<'w, Role>,
    xenos: Query<
        'w,
        's,
        (
            &'static Transform,
            &'static TailSweep,
            Option<&'static mut Plasma>,
            Has<Sweeping>,
        ),
    >,
    blockers: Query<
        'w,
        's,
        (),
        Or<(
            With<Resting>,
            With<Fortified>,
            With<Stunned>,
            With<KnockedDown>,
        )>,
    >,
    marines: Query<'w, 's, (Entity, &'static Transform), With<Marine>>,
    commands: Commands<'w, 's>,
}

impl TailSweepActivation<'_, '_> {
    /// Run one activation for `xeno`.
    ///
    /// All-or-nothing up to the point hits are resolved: a cancelled attempt,
    /// missing transform or unpaid cost leaves no session and no effects.
    pub fn activate(&mut self, xeno: Entity) -> ActivationOutcome {
        // TODO: rewind marine positions to the sender's view once inputs carry a timestamp.
        let Ok((transform, ability, plasma, sweeping)) = self.xenos.get_mut(xeno) else {
            return ActivationOutcome::FAILED;
        };

        if self.blockers.contains(xeno) {
            debug!("Tail sweep by {xeno} cancelled by attempt check");
            return ActivationOutcome::CANCELLED;
        }

        let cost = ability.plasma_cost;
        let available = plasma.as_ref().map_or(0.0, |p| p.current);
        let paid = plasma.is_some_and(|mut plasma| plasma.try_remove(cost));
        if !paid {
            self.commands.trigger(PlasmaPopup {
                xeno,
                cost,
                available,
            });
            return ActivationOutcome::FAILED;
        }

        self.commands
            .trigger(SoundCue::predicted(ability.sound.clone(), xeno));
        // a running sweep keeps its progress
        if !sweeping {
            self.commands
                .entity(xeno)
                .insert(Sweeping::from_ability(ability));
        }

        if !self.role.is_authoritative() {
            return ActivationOutcome::HANDLED;
        }

        let origin = transform.translation.planar();
        let candidates = self
            .marines
            .iter()
            .filter(|(marine, _)| *marine != xeno)
            .map(|(marine, tf)| SweepTarget {
                id: marine,
                pos: tf.translation.planar(),
            });
        let hits = resolve_sweep(origin, ability.range, candidates);

        debug!("Tail sweep by {xeno} hit {} target(s)", hits.len());
        for hit in hits {
            self.commands.trigger(DamageDealt {
                source: xeno,
                target: hit.id,
                damage: ability.damage,
                throw: hit.throw.grounded(),
                stun: ability.stun_time,
            });
        }

        ActivationOutcome::HANDLED
    }
}

fn on_tail_sweep_action(on: On<TailSweepAction>, mut sweep: TailSweepActivation) {
    let xeno = on.event().xeno;
    let outcome = sweep.activate(xeno);
    sweep.commands.trigger(TailSweepResolved { xeno, outcome });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::test_support::*;

    #[test]
    fn activation_pays_and_starts_session() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 50.0);

        let resolved = sweep(&mut app, xeno);

        assert_eq!(resolved, vec![ActivationOutcome::HANDLED]);
        let world = app.world();
        assert_eq!(world.get::<Plasma>(xeno).map(|p| p.current), Some(40.0));
        let session = world.get::<Sweeping>(xeno).expect("session");
        assert_eq!(session.total_rotations, 0);
        assert_eq!(session.last_direction, None);
        assert_eq!(queued_sounds(&mut app), vec![SoundScope::Predicted]);
    }

    #[test]
    fn insufficient_plasma_changes_nothing() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 5.0);
        let marine = spawn_marine(&mut app, Vec3::new(1.0, 0.0, 0.0));

        let resolved = sweep(&mut app, xeno);

        assert_eq!(resolved, vec![ActivationOutcome::FAILED]);
        let world = app.world();
        assert_eq!(world.get::<Plasma>(xeno).map(|p| p.current), Some(5.0));
        assert!(world.get::<Sweeping>(xeno).is_none());
        assert_untouched(&app, marine);
        assert!(queued_sounds(&mut app).is_empty());
        assert_eq!(app.world().resource::<Popups>().0, 1);
    }

    #[test]
    fn no_plasma_pool_counts_as_empty() {
        let mut app = test_app(Role::Authoritative);
        let xeno = app
            .world_mut()
            .spawn((Xeno, Transform::default(), TailSweep::default()))
            .id();

        assert_eq!(sweep(&mut app, xeno), vec![ActivationOutcome::FAILED]);
        assert!(app.world().get::<Sweeping>(xeno).is_none());
    }

    #[test]
    fn cancelled_attempt_costs_nothing() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 50.0);
        app.world_mut().entity_mut(xeno).insert(Resting);
        let marine = spawn_marine(&mut app, Vec3::new(1.0, 0.0, 0.0));

        let resolved = sweep(&mut app, xeno);

        assert_eq!(resolved, vec![ActivationOutcome::CANCELLED]);
        let world = app.world();
        assert_eq!(world.get::<Plasma>(xeno).map(|p| p.current), Some(50.0));
        assert!(world.get::<Sweeping>(xeno).is_none());
        assert_untouched(&app, marine);
        assert_eq!(app.world().resource::<Popups>().0, 0);
    }

    #[test]
    fn stunned_xeno_cannot_sweep() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 50.0);
        app.world_mut()
            .entity_mut(xeno)
            .insert(Stunned::new(Duration::from_secs(1)));

        assert_eq!(sweep(&mut app, xeno), vec![ActivationOutcome::CANCELLED]);
    }

    #[test]
    fn missing_transform_fails_quietly() {
        let mut app = test_app(Role::Authoritative);
        let xeno = app
            .world_mut()
            .spawn((Xeno, TailSweep::default(), Plasma::new(50.0)))
            .id();

        assert_eq!(sweep(&mut app, xeno), vec![ActivationOutcome::FAILED]);
        assert_eq!(app.world().get::<Plasma>(xeno).map(|p| p.current), Some(50.0));
    }

    #[test]
    fn only_marines_in_radius_are_hit() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 50.0);
        let near = spawn_marine(&mut app, Vec3::new(1.2, 0.0, 0.0));
        let far = spawn_marine(&mut app, Vec3::new(2.0, 0.0, 0.0));

        sweep(&mut app, xeno);

        let world = app.world();
        assert_eq!(world.get::<Health>(near).map(|h| h.current), Some(85.0));
        assert!(world.get::<Stunned>(near).is_some());
        assert!(world.get::<KnockedDown>(near).is_some());
        assert!(world.get::<Thrown>(near).is_some());
        assert_untouched(&app, far);
    }

    #[test]
    fn throw_follows_scaled_displacement() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::new(1.0, 0.0, 1.0), 50.0);
        app.world_mut()
            .get_mut::<TailSweep>(xeno)
            .expect("ability")
            .range = 6.0;
        let marine = spawn_marine(&mut app, Vec3::new(1.0, 0.0, 2.0));

        sweep(&mut app, xeno);

        let world = app.world();
        let velocity = world.get::<LinearVelocity>(marine).expect("velocity").0;
        assert!((velocity - Vec3::new(0.0, 0.0, THROW_STRENGTH)).length() < 1e-4);
        // offset of 2 units at strength 5
        let flight = &world.get::<Thrown>(marine).expect("thrown").flight;
        assert!((flight.duration().as_secs_f32() - 0.4).abs() < 1e-4);
    }

    #[test]
    fn observer_starts_session_without_hits() {
        let mut app = test_app(Role::Observer);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 50.0);
        let marine = spawn_marine(&mut app, Vec3::new(0.5, 0.0, 0.0));

        assert_eq!(sweep(&mut app, xeno), vec![ActivationOutcome::HANDLED]);
        assert!(app.world().get::<Sweeping>(xeno).is_some());
        assert_untouched(&app, marine);
    }

    #[test]
    fn reactivation_keeps_the_running_session() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 50.0);
        sweep(&mut app, xeno);
        tick(&mut app, Duration::ZERO);
        tick(&mut app, Duration::from_millis(100));
        let before = app.world().get::<Sweeping>(xeno).cloned().expect("session");
        assert_eq!(before.total_rotations, 2);

        assert_eq!(sweep(&mut app, xeno), vec![ActivationOutcome::HANDLED]);

        let world = app.world();
        assert_eq!(world.get::<Sweeping>(xeno), Some(&before));
        assert_eq!(world.get::<Plasma>(xeno).map(|p| p.current), Some(30.0));
    }

    #[test]
    fn fortified_xeno_cannot_sweep() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 50.0);
        app.world_mut().entity_mut(xeno).insert(Fortified);

        assert_eq!(sweep(&mut app, xeno), vec![ActivationOutcome::CANCELLED]);
        assert_eq!(app.world().get::<Plasma>(xeno).map(|p| p.current), Some(50.0));
        assert!(app.world().get::<Sweeping>(xeno).is_none());
    }

    #[test]
    fn knocked_down_xeno_cannot_sweep() {
        let mut app = test_app(Role::Authoritative);
        let xeno = spawn_xeno(&mut app, Vec3::ZERO, 50.0);
        app.world_mut()
            .entity_mut(xeno)
            .insert(KnockedDown::new(Duration::from_secs(1)));

        assert_eq!(sweep(&mut app, xeno), vec![ActivationOutcome::CANCELLED]);
        assert_eq!(app.world().get::<Plasma>(xeno).map(|p| p.current), Some(50.0));
        assert!(app.world().get::<Sweeping>(xeno).is_none());
    }
}
