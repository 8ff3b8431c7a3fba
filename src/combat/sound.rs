use crate::models::SweepSettings;
use bevy::prelude::*;
use rand::Rng;

pub fn plugin(app: &mut App) {
    app.init_resource::<SoundQueue>().add_observer(queue_sound);
}

/// Who gets to hear a sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundScope {
    /// Played locally by the acting client right away, and by the
    /// authoritative side for everyone else.
    Predicted,
    /// Played for everyone who can see the emitter.
    Pvs,
}

/// Request to play `sound` at `emitter`.
#[derive(Event, Clone, Debug)]
pub struct SoundCue {
    pub sound: String,
    pub emitter: Entity,
    pub scope: SoundScope,
}

impl SoundCue {
    pub fn predicted(sound: impl Into<String>, emitter: Entity) -> Self {
        Self {
            sound: sound.into(),
            emitter,
            scope: SoundScope::Predicted,
        }
    }

    pub fn pvs(sound: impl Into<String>, emitter: Entity) -> Self {
        Self {
            sound: sound.into(),
            emitter,
            scope: SoundScope::Pvs,
        }
    }
}

#[derive(Clone, Debug)]
pub struct QueuedSound {
    pub sound: String,
    pub emitter: Entity,
    pub scope: SoundScope,
    pub volume: f32,
    pub pitch: f32,
}

/// Sounds waiting for the audio backend to pick them up.
#[derive(Resource, Default, Debug)]
pub struct SoundQueue(Vec<QueuedSound>);

impl SoundQueue {
    pub fn drain(&mut self) -> impl Iterator<Item = QueuedSound> + '_ {
        self.0.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn queue_sound(on: On<SoundCue>, settings: Option<Res<SweepSettings>>, mut queue: ResMut<SoundQueue>) {
    let cue = on.event();
    let base = settings.map_or(1.0, |s| s.sfx_volume);
    if base <= 0.0 {
        return;
    }

    // Hits repeat a lot, vary them so a crowd doesn't sound like one marine
    let (volume, pitch) = match cue.scope {
        SoundScope::Predicted => (base, 1.0),
        SoundScope::Pvs => {
            let mut rng = rand::rng();
            (
                base * rng.random_range(0.85..1.15), // ±15%
                rng.random_range(0.92..1.08),        // ±8%
            )
        }
    };

    debug!("Queued '{}' at {} ({:?})", cue.sound, cue.emitter, cue.scope);
    queue.0.push(QueuedSound {
        sound: cue.sound.clone(),
        emitter: cue.emitter,
        scope: cue.scope,
        volume,
        pitch,
    });
}
