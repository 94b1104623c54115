use bullet_hell::compute::init_state;
use bullet_hell::config::GameConfig;
use bullet_hell::entities::*;
use bullet_hell::game::{quit_button, return_button, start_button, start_session};
use bullet_hell::geometry::Rect;
use bullet_hell::scene::*;

fn texts(cmds: &[DrawCommand]) -> Vec<String> {
    cmds.iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

// ── scene::build ──────────────────────────────────────────────────────────────

#[test]
fn main_menu_shows_title_and_two_buttons() {
    let cmds = build(&init_state(GameConfig::default()), 0);
    assert_eq!(cmds[0], DrawCommand::Clear(Rgb::BLACK));
    assert_eq!(texts(&cmds), vec!["Bullet Hell Game"]);
    let buttons: Vec<Rect> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Button { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    let config = GameConfig::default();
    assert_eq!(buttons, vec![start_button(&config), quit_button(&config)]);
}

#[test]
fn playing_draws_player_then_bullets_then_enemies_then_hud() {
    let mut s = start_session(&init_state(GameConfig::default()), 1000);
    s.session.kill_count = 4;
    s.session.bullets.push(Bullet {
        rect: Rect::new(10, 10, 5, 10),
        speed_y: 5,
        speed_x: 0,
        owner: BulletOwner::Enemy,
    });
    s.session.enemies.push(Enemy {
        rect: Rect::new(100, 0, 50, 50),
        fire_interval_ms: 1000,
        last_shot_ms: 0,
    });

    let cmds = build(&s, 13_500);
    assert_eq!(
        cmds[1],
        DrawCommand::Sprite {
            rect: s.session.player.rect,
            sprite: Sprite::Player
        }
    );
    assert_eq!(
        cmds[2],
        DrawCommand::Fill {
            rect: Rect::new(10, 10, 5, 10),
            color: Rgb::ORANGE
        }
    );
    assert!(matches!(cmds[3], DrawCommand::Sprite { sprite: Sprite::Enemy, .. }));
    assert_eq!(texts(&cmds), vec!["Lives: 3", "Kills: 4", "Time: 12s"]);
}

#[test]
fn hud_never_shows_negative_lives() {
    let mut s = start_session(&init_state(GameConfig::default()), 0);
    s.session.player.lives = -1;
    assert!(texts(&build(&s, 0)).contains(&"Lives: 0".to_string()));
}

#[test]
fn game_over_shows_frozen_stats() {
    let mut s = start_session(&init_state(GameConfig::default()), 0);
    s.status = GameStatus::GameOver;
    s.session.score = 1200;
    s.session.kill_count = 12;
    s.session.final_elapsed_secs = Some(42);

    let cmds = build(&s, 999_999);
    assert_eq!(
        texts(&cmds),
        vec!["Game Over", "Score: 1200", "Time: 42s", "Enemies Killed: 12"]
    );
    assert!(cmds.contains(&DrawCommand::Button {
        label: "Return to Main Menu".into(),
        rect: return_button(&GameConfig::default())
    }));
}
