//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the tick timestamp and, where needed, an RNG handle)
//! and returns a brand-new `GameState`.  Side effects are limited to the
//! injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, BulletOwner, Enemy, GameState, GameStatus, Player, Session};
use crate::geometry::{intersects, Rect};
use crate::input::TickInput;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: main menu, empty placeholder session.
pub fn init_state(config: GameConfig) -> GameState {
    let session = Session::new(&config, 0);
    GameState {
        status: GameStatus::MainMenu,
        session,
        config,
        frame: 0,
        quit_requested: false,
    }
}

fn player_bullet(config: &GameConfig, x: i32, y: i32, speed_x: i32) -> Bullet {
    Bullet {
        rect: Rect::new(x, y, config.bullet_width, config.bullet_height),
        speed_y: config.player_bullet_speed,
        speed_x,
        owner: BulletOwner::Player,
    }
}

fn enemy_bullet(config: &GameConfig, enemy: &Enemy) -> Bullet {
    Bullet {
        rect: Rect::new(
            enemy.rect.x + enemy.rect.w / 2 - config.bullet_width / 2,
            enemy.rect.bottom(),
            config.bullet_width,
            config.bullet_height,
        ),
        speed_y: config.enemy_bullet_speed,
        speed_x: 0,
        owner: BulletOwner::Enemy,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Held keys on one axis → signed delta.  Positive direction wins a tie.
fn axis(negative: bool, positive: bool, speed: i32) -> i32 {
    if positive {
        speed
    } else if negative {
        -speed
    } else {
        0
    }
}

/// Apply this tick's movement keys and clamp the ship inside the field.
pub fn move_player(state: &GameState, input: &TickInput) -> GameState {
    let c = &state.config;
    let rect = state.session.player.rect;
    let x = rect.x + axis(input.left, input.right, c.player_speed);
    let y = rect.y + axis(input.up, input.down, c.player_speed);
    let rect = Rect {
        x: x.clamp(0, c.screen_width - rect.w),
        y: y.clamp(0, c.screen_height - rect.h),
        ..rect
    };
    GameState {
        session: Session {
            player: Player {
                rect,
                ..state.session.player.clone()
            },
            ..state.session.clone()
        },
        ..state.clone()
    }
}

/// Whether the fire gate is open at `now_ms`.
pub fn can_fire(player: &Player, now_ms: u64) -> bool {
    player
        .last_shot_ms
        .map_or(true, |last| now_ms.saturating_sub(last) >= player.shot_interval_ms)
}

/// Fire a volley: one straight bullet plus one angled pair per unlocked
/// extra.  Gated by the player's shot interval.
pub fn player_shoot(state: &GameState, now_ms: u64) -> GameState {
    let player = &state.session.player;
    if !can_fire(player, now_ms) {
        return state.clone();
    }

    let c = &state.config;
    let x = player.rect.x + player.rect.w / 2 - c.bullet_width / 2;
    let y = player.rect.y;

    let mut bullets = state.session.bullets.clone();
    bullets.push(player_bullet(c, x, y, 0));
    for pair in 0..player.extra_bullet_pairs as i32 {
        let offset = c.extra_bullet_spread * (pair + 1);
        bullets.push(player_bullet(c, x, y, -offset));
        bullets.push(player_bullet(c, x, y, offset));
    }

    GameState {
        session: Session {
            player: Player {
                last_shot_ms: Some(now_ms),
                ..player.clone()
            },
            bullets,
            ..state.session.clone()
        },
        ..state.clone()
    }
}

// ── Progression ──────────────────────────────────────────────────────────────

/// Player upgrades after a kill.  `kill_count` already includes that kill.
pub fn register_kill(player: &Player, kill_count: u32, config: &GameConfig) -> Player {
    let mut extra_bullet_pairs = player.extra_bullet_pairs;
    if kill_count % config.kills_per_extra_pair == 0
        && extra_bullet_pairs < config.max_extra_bullet_pairs
    {
        extra_bullet_pairs += 1;
        log::debug!("Extra bullet pair unlocked ({extra_bullet_pairs}) at {kill_count} kills");
    }
    let shot_interval_ms = player
        .shot_interval_ms
        .saturating_sub(config.shot_interval_step_ms)
        .max(config.shot_interval_floor_ms);
    Player {
        extra_bullet_pairs,
        shot_interval_ms,
        ..player.clone()
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Spawn one enemy if the spawn interval has elapsed, then tighten the
/// interval toward its floor.
pub fn spawn_enemy(
    session: &Session,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Session {
    if now_ms.saturating_sub(session.last_spawn_ms) <= session.enemy_spawn_interval_ms {
        return session.clone();
    }

    let x = rng.gen_range(0..=config.screen_width - config.enemy_width);
    let fire_interval_ms =
        rng.gen_range(config.enemy_fire_interval_min_ms..config.enemy_fire_interval_max_ms);
    let mut enemies = session.enemies.clone();
    enemies.push(Enemy {
        rect: Rect::new(x, 0, config.enemy_width, config.enemy_height),
        fire_interval_ms,
        last_shot_ms: 0,
    });

    let enemy_spawn_interval_ms = session
        .enemy_spawn_interval_ms
        .saturating_sub(config.spawn_interval_step_ms)
        .max(config.spawn_interval_floor_ms);
    log::debug!("Enemy spawned at x={x}; next interval {enemy_spawn_interval_ms}ms");

    Session {
        enemies,
        last_spawn_ms: now_ms,
        enemy_spawn_interval_ms,
        ..session.clone()
    }
}

/// Keep the items whose flag is still set.
fn keep_marked<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &alive)| alive.then_some(item))
        .collect()
}

// ── Per-frame tick (RNG is injected) ────────────────────────────────────────

/// Advance the Playing simulation by one tick.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded RNG).
///
/// Hazards are resolved independently: a tick where an enemy rams the ship
/// and an enemy bullet hits it costs two lives.
pub fn tick(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let c = &state.config;
    let s = &state.session;

    // ── 1. Move bullets, drop the ones that left the field ───────────────────
    let mut bullets: Vec<Bullet> = s
        .bullets
        .iter()
        .filter_map(|b| {
            let rect = Rect {
                x: b.rect.x + b.speed_x,
                y: b.rect.y + b.speed_y,
                ..b.rect
            };
            (rect.y >= 0 && rect.y <= c.screen_height).then(|| Bullet { rect, ..b.clone() })
        })
        .collect();

    // ── 2. Move enemies down; each fires on its own timer ────────────────────
    let mut enemies: Vec<Enemy> = Vec::with_capacity(s.enemies.len());
    for e in &s.enemies {
        let mut enemy = Enemy {
            rect: Rect {
                y: e.rect.y + c.enemy_speed,
                ..e.rect
            },
            ..e.clone()
        };
        if now_ms.saturating_sub(enemy.last_shot_ms) > enemy.fire_interval_ms {
            bullets.push(enemy_bullet(c, &enemy));
            enemy.last_shot_ms = now_ms;
        }
        enemies.push(enemy);
    }

    // ── 3. Collision: player bullets ↔ enemies (first found, one each) ───────
    let mut player = s.player.clone();
    let mut score = s.score;
    let mut kill_count = s.kill_count;
    let mut enemy_alive = vec![true; enemies.len()];
    let mut bullet_alive = vec![true; bullets.len()];

    for (bi, bullet) in bullets.iter().enumerate() {
        if bullet.owner != BulletOwner::Player {
            continue;
        }
        let hit = enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| enemy_alive[*ei] && intersects(&bullet.rect, &enemy.rect))
            .map(|(ei, _)| ei);
        if let Some(ei) = hit {
            enemy_alive[ei] = false;
            bullet_alive[bi] = false;
            score += c.score_per_kill;
            kill_count += 1;
            player = register_kill(&player, kill_count, c);
        }
    }

    let mut enemies = keep_marked(enemies, &enemy_alive);
    let mut bullets = keep_marked(bullets, &bullet_alive);

    // ── 4. Collision: enemies ↔ player ───────────────────────────────────────
    let before = enemies.len();
    enemies.retain(|e| !intersects(&player.rect, &e.rect));
    let rammed = before - enemies.len();

    // ── 5. Collision: enemy bullets ↔ player ─────────────────────────────────
    let before = bullets.len();
    bullets.retain(|b| !(b.owner == BulletOwner::Enemy && intersects(&b.rect, &player.rect)));
    let shot = before - bullets.len();

    // ── 6. Enemies leaking past the bottom edge ──────────────────────────────
    let before = enemies.len();
    enemies.retain(|e| e.rect.bottom() < c.screen_height);
    let leaked = before - enemies.len();

    let hits = rammed + shot + leaked;
    if hits > 0 {
        player.lives -= hits as i32;
        log::debug!(
            "Player hit: rammed={rammed} shot={shot} leaked={leaked}, lives={}",
            player.lives
        );
    }

    // ── 7. Spawn ─────────────────────────────────────────────────────────────
    let session = spawn_enemy(
        &Session {
            player,
            enemies,
            bullets,
            score,
            kill_count,
            ..s.clone()
        },
        c,
        now_ms,
        rng,
    );

    // ── 8. Status ────────────────────────────────────────────────────────────
    if session.player.lives <= 0 {
        let elapsed = now_ms.saturating_sub(session.started_at_ms) / 1000;
        log::info!(
            "Game over: score={} kills={} time={}s",
            session.score,
            session.kill_count,
            elapsed
        );
        return GameState {
            status: GameStatus::GameOver,
            session: Session {
                final_elapsed_secs: Some(elapsed),
                ..session
            },
            ..state.clone()
        };
    }

    GameState {
        session,
        ..state.clone()
    }
}
