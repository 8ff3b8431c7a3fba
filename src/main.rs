//! Headless arena: one xeno sweeps three marines, then the app exits.

use avian3d::prelude::*;
use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use std::{path::Path, time::Duration};
use tail_sweep::{
    combat::*,
    models::{NetId, SETTINGS_PATH, SweepSettings},
    networking::SweepOutbox,
};

const FRAME: Duration = Duration::from_nanos(16_666_667);
const RUN_FOR: Duration = Duration::from_secs(3);

fn main() {
    let mut app = App::new();

    let filter = "info,tail_sweep=debug".to_string();
    let log_level = LogPlugin {
        level: bevy::log::Level::TRACE,
        filter,
        ..default()
    };

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(FRAME)),
        log_level,
        TransformPlugin,
        PhysicsPlugins::default(),
    ))
    .insert_resource(Gravity(Vec3::ZERO));

    // custom plugins. settings are loaded here, so read them after
    app.add_plugins(tail_sweep::plugin);
    let tick_hz = app.world().resource::<SweepSettings>().tick_hz;
    app.insert_resource(Time::<Fixed>::from_hz(tick_hz))
        .add_observer(log_resolved)
        .add_systems(
            Startup,
            (write_default_settings, (spawn_arena, start_sweep).chain()),
        )
        .add_systems(Update, (play_sounds, ship_deltas, exit_after_run));

    app.run();
}

/// Leave a settings file to tweak on the first run.
fn write_default_settings(settings: Res<SweepSettings>) {
    if Path::new(SETTINGS_PATH).exists() {
        return;
    }
    match settings.save() {
        Ok(()) => info!("Wrote default settings to '{SETTINGS_PATH}'"),
        Err(e) => error!("{e}"),
    }
}

fn spawn_arena(mut commands: Commands, settings: Res<SweepSettings>) {
    commands.spawn((
        Name::new("Xeno"),
        Xeno,
        NetId(1),
        settings.tail_sweep.ability(),
        Plasma::new(settings.plasma_max),
        Transform::default(),
        RigidBody::Kinematic,
        Collider::capsule(0.5, 1.0),
    ));

    // the last one stands outside the sweep radius
    let marines = [
        Vec3::new(1.2, 0.0, 0.0),
        Vec3::new(-0.6, 0.0, -0.6),
        Vec3::new(0.0, 0.0, 2.0),
    ];
    for (n, at) in marines.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Marine {n}")),
            Marine,
            NetId(10 + n as u64),
            Health::default(),
            Transform::from_translation(at),
            RigidBody::Dynamic,
            Collider::capsule(0.3, 1.0),
            LockedAxes::ROTATION_LOCKED,
        ));
    }
}

fn start_sweep(xeno: Single<Entity, With<Xeno>>, mut commands: Commands) {
    commands.trigger(TailSweepAction { xeno: *xeno });
}

fn log_resolved(on: On<TailSweepResolved>) {
    let event = on.event();
    info!("Tail sweep by {}: {:?}", event.xeno, event.outcome);
}

fn play_sounds(mut queue: ResMut<SoundQueue>) {
    if queue.is_empty() {
        return;
    }
    for sound in queue.drain() {
        debug!(
            "Playing '{}' at {} ({:?}, volume {:.2}, pitch {:.2})",
            sound.sound, sound.emitter, sound.scope, sound.volume, sound.pitch
        );
    }
}

fn ship_deltas(mut outbox: ResMut<SweepOutbox>) {
    if outbox.is_empty() {
        return;
    }
    for delta in outbox.drain() {
        match delta.encode() {
            Ok(blob) => debug!("Outgoing {blob}"),
            Err(e) => warn!("Failed to encode {:?}: {e}", delta.id()),
        }
    }
}

fn exit_after_run(
    time: Res<Time>,
    marines: Query<(&Name, &Health, &Transform), With<Marine>>,
    mut exit: MessageWriter<AppExit>,
) {
    if time.elapsed() < RUN_FOR {
        return;
    }
    for (name, health, transform) in marines.iter() {
        info!(
            "{name}: {:.0}/{:.0} hp at {:.2}",
            health.current, health.max, transform.translation
        );
    }
    exit.write(AppExit::Success);
}
