//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and the frame's draw commands.
//! No game logic is performed; this module only scales play-field
//! coordinates onto the terminal grid and emits terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::scene::{DrawCommand, Rgb, Sprite, TITLE_SIZE};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Cyan;
const C_ENEMY: Color = Color::Green;
const C_BUTTON_BG: Color = Color::White;
const C_BUTTON_FG: Color = Color::Black;

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the fixed-size play field onto a terminal of `cols` × `rows` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub field_width: i32,
    pub field_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, config: &GameConfig) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            field_width: config.screen_width,
            field_height: config.screen_height,
        }
    }

    fn scale(v: i32, cells: u16, field: i32) -> i64 {
        i64::from(v) * i64::from(cells) / i64::from(field)
    }

    fn scale_up(v: i32, cells: u16, field: i32) -> i64 {
        let n = i64::from(v) * i64::from(cells);
        let d = i64::from(field);
        (n + d - 1).div_euclid(d)
    }

    /// Cell containing a play-field point, clipped to the screen.
    pub fn to_cell(&self, x: i32, y: i32) -> (u16, u16) {
        let col = Self::scale(x, self.cols, self.field_width).clamp(0, i64::from(self.cols) - 1);
        let row = Self::scale(y, self.rows, self.field_height).clamp(0, i64::from(self.rows) - 1);
        (col as u16, row as u16)
    }

    /// Play-field point at the centre of a cell.
    pub fn to_field(&self, col: u16, row: u16) -> (i32, i32) {
        let x = (2 * i64::from(col) + 1) * i64::from(self.field_width) / (2 * i64::from(self.cols));
        let y = (2 * i64::from(row) + 1) * i64::from(self.field_height) / (2 * i64::from(self.rows));
        (x as i32, y as i32)
    }

    /// Half-open cell span `(col0, row0, col1, row1)` covered by `rect`.
    /// Always at least one cell, clipped to the screen; `None` if fully off.
    pub fn cell_span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = Self::scale(rect.x, self.cols, self.field_width);
        let r0 = Self::scale(rect.y, self.rows, self.field_height);
        let c1 = Self::scale_up(rect.right(), self.cols, self.field_width).max(c0 + 1);
        let r1 = Self::scale_up(rect.bottom(), self.rows, self.field_height).max(r0 + 1);

        let (cols, rows) = (i64::from(self.cols), i64::from(self.rows));
        let (c0, r0) = (c0.max(0), r0.max(0));
        let (c1, r1) = (c1.min(cols), r1.min(rows));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    commands: &[DrawCommand],
    viewport: &Viewport,
) -> std::io::Result<()> {
    for cmd in commands {
        match cmd {
            DrawCommand::Clear(_) => {
                out.queue(style::ResetColor)?;
                out.queue(terminal::Clear(terminal::ClearType::All))?;
            }
            DrawCommand::Fill { rect, color } => {
                fill(out, viewport, rect, "█", to_color(*color))?;
            }
            DrawCommand::Sprite { rect, sprite } => draw_sprite(out, viewport, rect, *sprite)?,
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                color,
                centered,
            } => draw_text(out, viewport, text, *x, *y, *size, *color, *centered)?,
            DrawCommand::Button { label, rect } => draw_button(out, viewport, label, rect)?,
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, viewport.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = viewport.cell_span(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat(usize::from(c1 - c0));
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_sprite<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    rect: &Rect,
    sprite: Sprite,
) -> std::io::Result<()> {
    match sprite {
        Sprite::Player => fill(out, viewport, rect, "▲", C_PLAYER),
        Sprite::Enemy => fill(out, viewport, rect, "▼", C_ENEMY),
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    text: &str,
    x: i32,
    y: i32,
    size: u16,
    color: Rgb,
    centered: bool,
) -> std::io::Result<()> {
    let (mut col, row) = viewport.to_cell(x, y);
    let width = text.chars().count() as u16;
    if centered {
        col = (viewport.cols / 2).saturating_sub(width / 2);
    }
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(to_color(color)))?;
    // Terminal text has one size; titles get bold instead.
    if size >= TITLE_SIZE {
        out.queue(style::SetAttribute(Attribute::Bold))?;
        out.queue(Print(text))?;
        out.queue(style::SetAttribute(Attribute::Reset))?;
    } else {
        out.queue(Print(text))?;
    }
    Ok(())
}

fn draw_button<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    label: &str,
    rect: &Rect,
) -> std::io::Result<()> {
    let Some((col, row, width)) = label_placement(viewport, label, rect) else {
        return Ok(());
    };
    out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
    fill(out, viewport, rect, " ", C_BUTTON_FG)?;

    let shown: String = label.chars().take(width).collect();
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BUTTON_FG))?;
    out.queue(Print(shown))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

/// First cell, row and visible width of a button label.  The label is
/// centred in the button's cells and cut to fit them, so every drawn label
/// cell is also a clickable one.
pub fn label_placement(
    viewport: &Viewport,
    label: &str,
    rect: &Rect,
) -> Option<(u16, u16, usize)> {
    let (c0, r0, c1, r1) = viewport.cell_span(rect)?;
    let span = usize::from(c1 - c0);
    let width = label.chars().count().min(span);
    let col = c0 + ((span - width) / 2) as u16;
    Some((col, r0 + (r1 - r0) / 2, width))
}
