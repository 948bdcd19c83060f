//! Tuning constants and runtime configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::GameError;
use crate::geometry::Field;

// Play field, in logical units
pub const FIELD_WIDTH: f32 = 600.0;
pub const FIELD_HEIGHT: f32 = 700.0;

// Frame loop
pub const TICKS_PER_SECOND: u32 = 50;
pub const MATCH_OVER_PAUSE: Duration = Duration::from_secs(2);

// Player
pub const PLAYER_SPEED: f32 = 10.0;
pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
/// Distance of the player's spawn point above the bottom edge.
pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

// Enemy
pub const ENEMY_WIDTH: f32 = 90.0;
pub const ENEMY_HEIGHT: f32 = 60.0;
pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
pub const ENEMY_FIRE_INTERVAL_MIN: u64 = 50;
pub const ENEMY_FIRE_INTERVAL_MAX: u64 = 300;
/// Tick on which the single enemy of the encounter appears.
pub const ENEMY_SPAWN_TICK: u64 = 0;

// Projectiles
pub const BULLET_SPEED: f32 = 6.0;
pub const BULLET_RADIUS_MIN: u32 = 10;
pub const BULLET_RADIUS_MAX: u32 = 50;
pub const BEAM_SPEED: f32 = 10.0;
pub const BEAM_WIDTH: f32 = 20.0;
pub const BEAM_HEIGHT: f32 = 40.0;

// Encounter
pub const MAX_HEALTH: i32 = 200;
pub const BEAM_DAMAGE: i32 = 10;
pub const HEALTH_BAR_WIDTH: f32 = 200.0;
/// Health ratio band (exclusive low, inclusive high) in which the scripted
/// timeline runs.
pub const SCRIPT_PHASE_LOW: f32 = 0.3;
pub const SCRIPT_PHASE_HIGH: f32 = 0.6;

// Special ability
pub const SPECIAL_USES: u8 = 3;
pub const CUTSCENE_FRAME_BUDGET: u32 = 90;
pub const CUTSCENE_FRAME_DELAY: Duration = Duration::from_millis(33);

// Explosion
pub const EXPLOSION_LIFE: i32 = 50;

pub const DEFAULT_LOG_PATH: &str = "debug.log";

/// Runtime configuration assembled from the constants above and the
/// `KOKATON_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub field: Field,
    pub tick_rate: u32,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Directory of still images played as the special-ability cutscene.
    pub cutscene_dir: Option<PathBuf>,
    pub cutscene_frame_budget: u32,
    pub fire_sound: Option<PathBuf>,
    pub log_path: PathBuf,
    pub match_over_pause: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: Field::new(FIELD_WIDTH, FIELD_HEIGHT),
            tick_rate: TICKS_PER_SECOND,
            seed: None,
            cutscene_dir: None,
            cutscene_frame_budget: CUTSCENE_FRAME_BUDGET,
            fire_sound: None,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            match_over_pause: MATCH_OVER_PAUSE,
        }
    }
}

impl GameConfig {
    /// Reads overrides from the process environment
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep their
    /// defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("KOKATON_SEED") {
            config.seed = Some(parse_value("KOKATON_SEED", &raw)?);
        }
        if let Some(raw) = lookup("KOKATON_CUTSCENE_FRAMES") {
            let budget: u32 = parse_value("KOKATON_CUTSCENE_FRAMES", &raw)?;
            if budget == 0 {
                return Err(GameError::InvalidConfig {
                    key: "KOKATON_CUTSCENE_FRAMES",
                    value: raw,
                });
            }
            config.cutscene_frame_budget = budget;
        }
        config.cutscene_dir = lookup("KOKATON_CUTSCENE_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        config.fire_sound = lookup("KOKATON_FIRE_SOUND")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        if let Some(path) = lookup("KOKATON_LOG").filter(|s| !s.is_empty()) {
            config.log_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Wall-clock length of one simulation tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, GameError> {
    raw.trim().parse().map_err(|_| GameError::InvalidConfig {
        key,
        value: raw.to_string(),
    })
}
