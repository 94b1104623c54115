//! Terminal input → per-tick input snapshot.
//!
//! Instead of acting on each key event individually, `KeyTracker` records the
//! frame number of the last press/repeat event for every key.  Each frame we
//! check which keys are still "fresh" (within the hold window) and apply
//! all their effects simultaneously, so Space + arrows can be held together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper
//!   `Press` / `Repeat` / `Release` events → keys are removed on release.
//! * **Classic terminals**: only `Press` events.  Keys expire naturally after
//!   `HOLD_WINDOW_MS` of silence, longer than common OS key-repeat gaps.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// A key counts as held this long after its last press/repeat.
pub const HOLD_WINDOW_MS: u64 = 133;

/// Hold window in whole frames at `fps`, rounded up, at least one.
pub fn hold_frames(fps: u32) -> u64 {
    (HOLD_WINDOW_MS * u64::from(fps)).div_ceil(1000).max(1)
}

/// Everything the simulation reads from the player in one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Pointer presses in play-field coordinates, oldest first.
    pub clicks: Vec<(i32, i32)>,
}

/// One-shot actions that bypass the held-key model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Quit,
    /// Activate the current screen's main button.
    Confirm,
    /// Left mouse press at a terminal cell.
    Pointer { col: u16, row: u16 },
}

#[derive(Debug)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    hold_frames: u64,
}

/// Letter keys are tracked case-insensitively.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl KeyTracker {
    pub fn new(fps: u32) -> Self {
        Self {
            key_frame: HashMap::new(),
            hold_frames: hold_frames(fps),
        }
    }

    pub fn hold_frames(&self) -> u64 {
        self.hold_frames
    }

    pub fn press(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(normalize(code), frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.key_frame.remove(&normalize(code));
    }

    /// Returns true if `code` was seen within the last `hold_frames` frames.
    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&normalize(code))
            .map(|&last| frame.saturating_sub(last) <= self.hold_frames)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode], frame: u64) -> bool {
        codes.iter().any(|&code| self.is_held(code, frame))
    }

    /// Feed one terminal event.  Returns a signal for one-shot actions.
    pub fn handle(&mut self, event: &Event, frame: u64) -> Option<Signal> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => match kind {
                KeyEventKind::Press => {
                    self.press(*code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            Some(Signal::Quit)
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            Some(Signal::Quit)
                        }
                        KeyCode::Enter => Some(Signal::Confirm),
                        _ => None,
                    }
                }
                KeyEventKind::Repeat => {
                    self.press(*code, frame);
                    None
                }
                KeyEventKind::Release => {
                    self.release(*code);
                    None
                }
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(Signal::Pointer {
                col: *column,
                row: *row,
            }),
            _ => None,
        }
    }

    /// Held-key state at `frame`, without clicks.
    pub fn snapshot(&self, frame: u64) -> TickInput {
        TickInput {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s')], frame),
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a')], frame),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d')], frame),
            fire: self.is_held(KeyCode::Char(' '), frame),
            clicks: Vec::new(),
        }
    }
}
