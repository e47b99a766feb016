//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session. No game logic is performed; this module only translates the
//! session's drawables into terminal commands. World pixels map onto the
//! terminal grid at one map column per character column and two tiles per
//! character row.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::Sprite;
use crate::map::TILE_SIZE;
use crate::session::{Drawable, GameSession, GameStatus, SCREEN_WIDTH_PX};

// ── Cell geometry ─────────────────────────────────────────────────────────────

/// World pixels per character cell, horizontally and vertically.
const CELL_W: i32 = TILE_SIZE;
const CELL_H: i32 = TILE_SIZE * 2;

/// Playfield size in character cells.
const GRID_COLS: i32 = SCREEN_WIDTH_PX / CELL_W;
const GRID_ROWS: i32 = 20;

/// Playfield starts below the HUD row.
const TOP_ROW: u16 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TERRAIN: Color = Color::Green;
const C_SHIP: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_BOMB: Color = Color::Magenta;
const C_ROCKET: Color = Color::Red;
const C_FUEL_TANK: Color = Color::Yellow;
const C_EXPLOSION: Color = Color::Yellow;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, session)?;
    for drawable in session.drawables() {
        draw_drawable(out, &drawable)?;
    }
    draw_controls_hint(out)?;

    if session.status() == GameStatus::GameOver {
        draw_game_over(out, session)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, TOP_ROW + GRID_ROWS as u16 + 1))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "FUEL:{:>3}  SCORE:{:>6}",
        session.fuel(),
        session.score()
    )))?;

    if !session.is_started() {
        out.queue(cursor::MoveTo(GRID_COLS as u16 / 2 - 8, 0))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("ENTER to launch"))?;
    } else if session.is_paused() {
        out.queue(cursor::MoveTo(GRID_COLS as u16 / 2 - 4, 0))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("PAUSED"))?;
    }
    Ok(())
}

// ── Drawables ─────────────────────────────────────────────────────────────────

/// Glyph and colour for one sprite frame.
fn glyph_for(sprite: Sprite) -> (&'static str, Color) {
    match sprite {
        Sprite::Terrain => ("█", C_TERRAIN),
        Sprite::Ship(0) => ("►", C_SHIP),
        Sprite::Ship(_) => ("▶", C_SHIP),
        Sprite::Bullet => ("─", C_BULLET),
        Sprite::Bomb(_) => ("●", C_BOMB),
        Sprite::Rocket(frame) => {
            if frame % 2 == 0 {
                ("▲", C_ROCKET)
            } else {
                ("Δ", C_ROCKET)
            }
        }
        Sprite::FuelTank(_) => ("◙", C_FUEL_TANK),
        Sprite::ShipExplosion(frame)
        | Sprite::BulletExplosion(frame)
        | Sprite::BombExplosion(frame)
        | Sprite::RocketExplosion(frame)
        | Sprite::FuelTankExplosion(frame) => {
            if frame % 2 == 0 {
                ("✸", C_EXPLOSION)
            } else {
                ("✶", Color::Red)
            }
        }
    }
}

fn draw_drawable<W: Write>(out: &mut W, drawable: &Drawable) -> std::io::Result<()> {
    let col = drawable.x / CELL_W;
    let row_start = drawable.y / CELL_H;
    // Cover at least one cell so thin entities stay visible.
    let row_end = ((drawable.y + drawable.height + CELL_H - 1) / CELL_H).max(row_start + 1);

    if col < 0 || col >= GRID_COLS {
        return Ok(());
    }

    let (glyph, color) = glyph_for(drawable.sprite);
    out.queue(style::SetForegroundColor(color))?;
    for row in row_start.max(0)..row_end.min(GRID_ROWS) {
        out.queue(cursor::MoveTo(col as u16, TOP_ROW + row as u16))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, TOP_ROW + GRID_ROWS as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "↑↓←→ : Move   SPACE : Shoot   B : Bomb   P : Pause   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    let lines = [
        "╔══════════════════╗".to_string(),
        "║    GAME  OVER    ║".to_string(),
        format!("║  Score: {:>7}  ║", session.score()),
        "╚══════════════════╝".to_string(),
    ];
    let cx = (GRID_COLS as u16) / 2;
    let start_row = TOP_ROW + (GRID_ROWS as u16) / 2 - 2;

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}
