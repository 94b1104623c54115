//! Game tuning.
//!
//! Every balance number lives here so a JSON file can override it without a
//! rebuild. Missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play field ===
    pub screen_width: i32,
    pub screen_height: i32,
    pub target_fps: u32,

    // === Player ===
    pub player_width: i32,
    pub player_height: i32,
    pub player_start_x: i32,
    pub player_start_y: i32,
    /// Pixels per tick on each axis
    pub player_speed: i32,
    pub player_lives: i32,
    pub shot_interval_ms: u64,
    /// Shot interval reduction per kill
    pub shot_interval_step_ms: u64,
    pub shot_interval_floor_ms: u64,
    /// One extra bullet pair is unlocked every this many kills
    pub kills_per_extra_pair: u32,
    pub max_extra_bullet_pairs: u32,

    // === Bullets ===
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub player_bullet_speed: i32,
    pub enemy_bullet_speed: i32,
    /// Horizontal speed of the first angled pair; each further pair adds this again
    pub extra_bullet_spread: i32,

    // === Enemies ===
    pub enemy_width: i32,
    pub enemy_height: i32,
    pub enemy_speed: i32,
    pub enemy_fire_interval_min_ms: u64,
    /// Exclusive upper bound
    pub enemy_fire_interval_max_ms: u64,

    // === Spawner ===
    pub spawn_interval_ms: u64,
    pub spawn_interval_step_ms: u64,
    pub spawn_interval_floor_ms: u64,

    // === Scoring ===
    pub score_per_kill: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            target_fps: 60,

            player_width: 50,
            player_height: 50,
            player_start_x: 400,
            player_start_y: 500,
            player_speed: 5,
            player_lives: 3,
            shot_interval_ms: 300,
            shot_interval_step_ms: 5,
            shot_interval_floor_ms: 100,
            kills_per_extra_pair: 20,
            max_extra_bullet_pairs: 2,

            bullet_width: 5,
            bullet_height: 10,
            player_bullet_speed: -10,
            enemy_bullet_speed: 5,
            extra_bullet_spread: 5,

            enemy_width: 50,
            enemy_height: 50,
            enemy_speed: 2,
            enemy_fire_interval_min_ms: 1000,
            enemy_fire_interval_max_ms: 3000,

            spawn_interval_ms: 3000,
            spawn_interval_step_ms: 100,
            spawn_interval_floor_ms: 200,

            score_per_kill: 100,
        }
    }
}

impl GameConfig {
    /// Load a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.target_fps == 0 {
            return invalid("target_fps must be > 0".into());
        }
        for (name, w, h) in [
            ("player", self.player_width, self.player_height),
            ("enemy", self.enemy_width, self.enemy_height),
            ("bullet", self.bullet_width, self.bullet_height),
        ] {
            if w <= 0 || h <= 0 {
                return invalid(format!("{name} size must be positive, got {w}x{h}"));
            }
            if w > self.screen_width || h > self.screen_height {
                return invalid(format!(
                    "{name} size {w}x{h} does not fit a {}x{} screen",
                    self.screen_width, self.screen_height
                ));
            }
        }
        let (max_x, max_y) = (
            self.screen_width - self.player_width,
            self.screen_height - self.player_height,
        );
        if !(0..=max_x).contains(&self.player_start_x)
            || !(0..=max_y).contains(&self.player_start_y)
        {
            return invalid(format!(
                "player start ({}, {}) is outside 0..={max_x} x 0..={max_y}",
                self.player_start_x, self.player_start_y
            ));
        }
        if self.player_speed < 0 {
            return invalid(format!("player_speed must be >= 0, got {}", self.player_speed));
        }
        if self.player_lives <= 0 {
            return invalid("player_lives must be > 0".into());
        }
        if self.player_bullet_speed >= 0 {
            return invalid("player_bullet_speed must be negative (upward)".into());
        }
        if self.enemy_bullet_speed <= 0 {
            return invalid("enemy_bullet_speed must be positive (downward)".into());
        }
        if self.shot_interval_floor_ms > self.shot_interval_ms {
            return invalid(format!(
                "shot_interval_floor_ms {} exceeds shot_interval_ms {}",
                self.shot_interval_floor_ms, self.shot_interval_ms
            ));
        }
        if self.spawn_interval_floor_ms > self.spawn_interval_ms {
            return invalid(format!(
                "spawn_interval_floor_ms {} exceeds spawn_interval_ms {}",
                self.spawn_interval_floor_ms, self.spawn_interval_ms
            ));
        }
        if self.enemy_fire_interval_min_ms >= self.enemy_fire_interval_max_ms {
            return invalid("enemy fire interval range is empty".into());
        }
        if self.kills_per_extra_pair == 0 {
            return invalid("kills_per_extra_pair must be > 0".into());
        }
        Ok(())
    }

    /// Milliseconds per frame at the target rate.
    pub fn frame_budget_ms(&self) -> u64 {
        1000 / u64::from(self.target_fps)
    }
}
