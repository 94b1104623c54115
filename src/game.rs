//! Menu → Playing → GameOver state machine.
//!
//! Buttons are sized from their labels, centred on the play field, and only
//! react in the state that shows them.  Entering Playing always starts a
//! fresh session.

use rand::Rng;

use crate::compute::{move_player, player_shoot, tick};
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Session};
use crate::geometry::Rect;
use crate::input::TickInput;

// ── Buttons ───────────────────────────────────────────────────────────────────

pub const START_LABEL: &str = "Start Game";
pub const QUIT_LABEL: &str = "Quit Game";
pub const RETURN_LABEL: &str = "Return to Main Menu";

/// Field pixels per label character: one column of an 80-column terminal.
pub const BUTTON_GLYPH_WIDTH: i32 = 10;
pub const BUTTON_PADDING: i32 = 20;
pub const BUTTON_HEIGHT: i32 = 50;

/// Label width plus padding on both sides, centred horizontally, top edge at `y`.
pub fn button_rect(label: &str, y: i32, config: &GameConfig) -> Rect {
    let w = label.chars().count() as i32 * BUTTON_GLYPH_WIDTH + 2 * BUTTON_PADDING;
    Rect::new((config.screen_width - w) / 2, y, w, BUTTON_HEIGHT)
}

pub fn start_button(config: &GameConfig) -> Rect {
    button_rect(START_LABEL, 250, config)
}

pub fn quit_button(config: &GameConfig) -> Rect {
    button_rect(QUIT_LABEL, 350, config)
}

pub fn return_button(config: &GameConfig) -> Rect {
    button_rect(RETURN_LABEL, 450, config)
}

/// The button that Enter activates on each screen.
pub fn primary_button(state: &GameState) -> Option<Rect> {
    match state.status {
        GameStatus::MainMenu => Some(start_button(&state.config)),
        GameStatus::GameOver => Some(return_button(&state.config)),
        GameStatus::Playing => None,
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// Reset every session counter and switch to Playing.
pub fn start_session(state: &GameState, now_ms: u64) -> GameState {
    log::info!("Session started at {now_ms}ms");
    GameState {
        status: GameStatus::Playing,
        session: Session::new(&state.config, now_ms),
        ..state.clone()
    }
}

/// Route one pointer press at play-field coordinates.
pub fn handle_click(state: &GameState, x: i32, y: i32, now_ms: u64) -> GameState {
    let config = &state.config;
    match state.status {
        GameStatus::MainMenu if start_button(config).contains_point(x, y) => {
            start_session(state, now_ms)
        }
        GameStatus::MainMenu if quit_button(config).contains_point(x, y) => {
            log::info!("Quit requested from main menu");
            GameState {
                quit_requested: true,
                ..state.clone()
            }
        }
        GameStatus::GameOver if return_button(config).contains_point(x, y) => {
            log::info!("Returned to main menu");
            GameState {
                status: GameStatus::MainMenu,
                ..state.clone()
            }
        }
        _ => state.clone(),
    }
}

/// One full tick: clicks, then (while Playing) player command and the
/// simulation update.  Nothing moves outside Playing.
pub fn step(state: &GameState, input: &TickInput, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let mut next = input
        .clicks
        .iter()
        .fold(state.clone(), |s, &(x, y)| handle_click(&s, x, y, now_ms));

    if next.status == GameStatus::Playing {
        next = move_player(&next, input);
        if input.fire {
            next = player_shoot(&next, now_ms);
        }
        next = tick(&next, now_ms, rng);
    }

    next.frame += 1;
    next
}
