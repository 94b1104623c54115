//! All game entity types. Pure data, no logic.

use crate::config::GameConfig;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    MainMenu,
    Playing,
    GameOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Negative = upward.
    pub speed_y: i32,
    /// Non-zero only for the angled extra bullets.
    pub speed_x: i32,
    pub owner: BulletOwner,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Signed: several hits in one tick may push it below zero.
    pub lives: i32,
    pub shot_interval_ms: u64,
    pub extra_bullet_pairs: u32,
    /// `None` until the first shot of the session.
    pub last_shot_ms: Option<u64>,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Player {
            rect: Rect::new(
                config.player_start_x,
                config.player_start_y,
                config.player_width,
                config.player_height,
            ),
            lives: config.player_lives,
            shot_interval_ms: config.shot_interval_ms,
            extra_bullet_pairs: 0,
            last_shot_ms: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub fire_interval_ms: u64,
    /// Zero until the first shot.
    pub last_shot_ms: u64,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything that lives from entering Playing until the next reset.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub score: u32,
    pub kill_count: u32,
    pub enemy_spawn_interval_ms: u64,
    pub last_spawn_ms: u64,
    pub started_at_ms: u64,
    /// Frozen when the session ends.
    pub final_elapsed_secs: Option<u64>,
}

impl Session {
    pub fn new(config: &GameConfig, now_ms: u64) -> Self {
        Session {
            player: Player::new(config),
            enemies: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            kill_count: 0,
            enemy_spawn_interval_ms: config.spawn_interval_ms,
            // Spawn timer runs on the absolute clock, so an overdue first
            // enemy arrives on the first Playing tick.
            last_spawn_ms: 0,
            started_at_ms: now_ms,
            final_elapsed_secs: None,
        }
    }

    /// Whole seconds since the session started, or the frozen value once over.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        self.final_elapsed_secs
            .unwrap_or_else(|| now_ms.saturating_sub(self.started_at_ms) / 1000)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub status: GameStatus,
    pub session: Session,
    pub config: GameConfig,
    pub frame: u64,
    /// Set by the Quit button; the driver exits after the current frame.
    pub quit_requested: bool,
}
