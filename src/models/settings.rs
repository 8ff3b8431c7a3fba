use super::*;
use crate::combat::TailSweep;
use std::{fs, path::Path, time::Duration};
use tail_sweep_shared::combat::defaults;
use thiserror::Error;

pub const SETTINGS_PATH: &str = "assets/sweep.ron";

pub fn plugin(app: &mut App) {
    let settings = SweepSettings::load();
    app.insert_resource(settings.role)
        .insert_resource(settings)
        .register_type::<SweepSettings>();
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::de::SpannedError,
    },
    #[error("invalid settings in '{path}': {reason}")]
    Invalid { path: String, reason: String },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Resource, Reflect, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[reflect(Resource)]
#[serde(default)]
pub struct SweepSettings {
    pub role: Role,
    /// Simulation ticks per second.
    pub tick_hz: f64,
    pub sfx_volume: f32,
    pub plasma_max: f32,
    pub tail_sweep: TailSweepSettings,
}

impl SweepSettings {
    pub fn load() -> Self {
        match Self::load_from(SETTINGS_PATH) {
            Ok(settings) => {
                info!("Loaded settings from '{SETTINGS_PATH}'");
                settings
            }
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Self = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        settings.validate().map_err(|reason| ConfigError::Invalid {
            path: path.display().to_string(),
            reason,
        })?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(format!("tick_hz must be positive, got {}", self.tick_hz));
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(SETTINGS_PATH)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = ron::ser::to_string_pretty(self, Default::default())?;
        fs::write(path, content).map_err(write_err)?;
        Ok(())
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            role: Role::Authoritative,
            tick_hz: 30.0,
            sfx_volume: 1.0,
            plasma_max: defaults::PLASMA_MAX,
            tail_sweep: TailSweepSettings::default(),
        }
    }
}

/// File form of [`TailSweep`], with durations in seconds.
#[derive(Reflect, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TailSweepSettings {
    pub plasma_cost: f32,
    pub damage: Option<f32>,
    pub range: f32,
    pub stun_secs: f32,
    pub max_rotations: u32,
    pub rotation_delay_secs: f32,
    pub sound: String,
    pub hit_sound: String,
    pub hit_effect: String,
}

impl TailSweepSettings {
    /// Durations that do not fit a [`Duration`] fall back to the defaults.
    pub fn ability(&self) -> TailSweep {
        let defaults = TailSweep::default();
        TailSweep {
            plasma_cost: self.plasma_cost,
            damage: self.damage,
            range: self.range,
            stun_time: seconds_or(self.stun_secs, defaults.stun_time),
            max_rotations: self.max_rotations,
            rotation_delay: seconds_or(self.rotation_delay_secs, defaults.rotation_delay),
            sound: self.sound.clone(),
            hit_sound: self.hit_sound.clone(),
            hit_effect: self.hit_effect.clone(),
        }
    }
}

fn seconds_or(secs: f32, fallback: Duration) -> Duration {
    Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or_else(|e| {
        warn!("{secs}s is not a usable duration ({e}), using {fallback:?}");
        fallback
    })
}

impl Default for TailSweepSettings {
    fn default() -> Self {
        let ability = TailSweep::default();
        Self {
            plasma_cost: ability.plasma_cost,
            damage: ability.damage,
            range: ability.range,
            stun_secs: ability.stun_time.as_secs_f32(),
            max_rotations: ability.max_rotations,
            rotation_delay_secs: ability.rotation_delay.as_secs_f32(),
            sound: ability.sound,
            hit_sound: ability.hit_sound,
            hit_effect: ability.hit_effect,
        }
    }
}
