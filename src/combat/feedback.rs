use super::*;

const FLASH_DURATION: Duration = Duration::from_millis(200);
const HIT_EFFECT_LIFETIME: Duration = Duration::from_millis(500);

pub fn plugin(app: &mut App) {
    app.add_observer(on_hit_landed)
        .add_systems(Update, (fade_color_flashes, expire_hit_effects));
}

fn on_hit_landed(
    on: On<HitLanded>,
    sources: Query<&TailSweep>,
    targets: Query<(), With<Transform>>,
    mut commands: Commands,
) {
    let event = on.event();
    if !targets.contains(event.target) {
        return;
    }

    commands.entity(event.target).try_insert(ColorFlash {
        color: Color::srgb(1.0, 0.0, 0.0),
        timer: Timer::new(FLASH_DURATION, TimerMode::Once),
    });

    let Ok(ability) = sources.get(event.source) else {
        return;
    };

    commands.trigger(SoundCue::pvs(ability.hit_sound.clone(), event.target));
    commands.spawn((
        Name::new("Hit effect"),
        HitEffect {
            id: ability.hit_effect.clone(),
            lifetime: Timer::new(HIT_EFFECT_LIFETIME, TimerMode::Once),
        },
        Transform::default(),
        ChildOf(event.target),
    ));
}

fn fade_color_flashes(
    time: Res<Time>,
    mut query: Query<(Entity, &mut ColorFlash)>,
    mut commands: Commands,
) {
    for (entity, mut flash) in query.iter_mut() {
        if flash.timer.tick(time.delta()).is_finished() {
            commands.entity(entity).try_remove::<ColorFlash>();
        }
    }
}

fn expire_hit_effects(
    time: Res<Time>,
    mut query: Query<(Entity, &mut HitEffect)>,
    mut commands: Commands,
) {
    for (entity, mut effect) in query.iter_mut() {
        if effect.lifetime.tick(time.delta()).is_finished() {
            commands.entity(entity).try_despawn();
        }
    }
}
