//! Render-sink contract: the core describes each frame as an ordered list of
//! draw commands and never touches the terminal itself.

use crate::entities::{BulletOwner, GameState, GameStatus};
use crate::game::{
    quit_button, return_button, start_button, QUIT_LABEL, RETURN_LABEL, START_LABEL,
};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    pub const ORANGE: Rgb = Rgb { r: 255, g: 160, b: 40 };
}

/// Texture handles for the two textured entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Enemy,
}

pub const TITLE_SIZE: u16 = 72;
pub const TEXT_SIZE: u16 = 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Rgb),
    Fill { rect: Rect, color: Rgb },
    Sprite { rect: Rect, sprite: Sprite },
    Text {
        text: String,
        x: i32,
        y: i32,
        size: u16,
        color: Rgb,
        /// Ignore `x` and centre horizontally.
        centered: bool,
    },
    Button { label: String, rect: Rect },
}

fn text(text: impl Into<String>, x: i32, y: i32, size: u16, color: Rgb) -> DrawCommand {
    DrawCommand::Text {
        text: text.into(),
        x,
        y,
        size,
        color,
        centered: false,
    }
}

fn centered(text: impl Into<String>, y: i32, size: u16, color: Rgb) -> DrawCommand {
    DrawCommand::Text {
        text: text.into(),
        x: 0,
        y,
        size,
        color,
        centered: true,
    }
}

fn button(label: &str, rect: Rect) -> DrawCommand {
    DrawCommand::Button {
        label: label.to_string(),
        rect,
    }
}

/// Build the draw list for the current screen.
pub fn build(state: &GameState, now_ms: u64) -> Vec<DrawCommand> {
    let mut cmds = vec![DrawCommand::Clear(Rgb::BLACK)];
    match state.status {
        GameStatus::MainMenu => {
            cmds.push(centered("Bullet Hell Game", 100, TITLE_SIZE, Rgb::RED));
            cmds.push(button(START_LABEL, start_button(&state.config)));
            cmds.push(button(QUIT_LABEL, quit_button(&state.config)));
        }
        GameStatus::Playing => {
            let s = &state.session;
            cmds.push(DrawCommand::Sprite {
                rect: s.player.rect,
                sprite: Sprite::Player,
            });
            for bullet in &s.bullets {
                let color = match bullet.owner {
                    BulletOwner::Player => Rgb::WHITE,
                    BulletOwner::Enemy => Rgb::ORANGE,
                };
                cmds.push(DrawCommand::Fill {
                    rect: bullet.rect,
                    color,
                });
            }
            for enemy in &s.enemies {
                cmds.push(DrawCommand::Sprite {
                    rect: enemy.rect,
                    sprite: Sprite::Enemy,
                });
            }
            // HUD
            let lives = s.player.lives.max(0);
            cmds.push(text(format!("Lives: {lives}"), 10, 10, TEXT_SIZE, Rgb::WHITE));
            cmds.push(text(format!("Kills: {}", s.kill_count), 10, 40, TEXT_SIZE, Rgb::WHITE));
            cmds.push(text(
                format!("Time: {}s", s.elapsed_secs(now_ms)),
                10,
                70,
                TEXT_SIZE,
                Rgb::WHITE,
            ));
        }
        GameStatus::GameOver => {
            let s = &state.session;
            cmds.push(centered("Game Over", 150, TITLE_SIZE, Rgb::RED));
            cmds.push(centered(format!("Score: {}", s.score), 250, TEXT_SIZE, Rgb::WHITE));
            cmds.push(centered(
                format!("Time: {}s", s.elapsed_secs(now_ms)),
                300,
                TEXT_SIZE,
                Rgb::WHITE,
            ));
            cmds.push(centered(
                format!("Enemies Killed: {}", s.kill_count),
                350,
                TEXT_SIZE,
                Rgb::WHITE,
            ));
            cmds.push(button(RETURN_LABEL, return_button(&state.config)));
        }
    }
    cmds
}
