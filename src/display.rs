/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.
///
/// Layout: row 0 is the HUD, rows 1 and `height-2` are the playfield
/// border, the last row is the controls hint.  Logical playfield
/// coordinates map to terminal cells at a fixed (+1, +2) offset.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sky_barrage::entities::{
    AreaEffect, Beam, Bomb, BombColor, DescentState, Enemy, Explosion, Facing, GameState,
    GameStatus, Look,
};
use sky_barrage::geometry::Rect;

/// Terminal column of logical x = 0.
const OFF_X: u16 = 1;
/// Terminal row of logical y = 0.
const OFF_Y: u16 = 2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HAPPY: Color = Color::Yellow;
const C_PLAYER_SAD: Color = Color::Red;
const C_ENEMY_DESCENDING: Color = Color::Green;
const C_ENEMY_STOPPED: Color = Color::Red;
const C_BEAM: Color = Color::Cyan;
const C_AREA: Color = Color::DarkGrey;
const C_AREA_TAG: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame in the fixed layer order: background border
/// and HUD, then beams, enemies, bombs, area overlay, explosions, player.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state)?;
    draw_hud(out, state)?;

    for beam in &state.beams {
        draw_beam(out, beam, state)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, enemy, state.width)?;
    }
    for bomb in &state.bombs {
        draw_bomb(out, bomb, state)?;
    }
    if let Some(area) = &state.area_effect {
        draw_area_effect(out, area, state)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, explosion, state)?;
    }

    draw_player(out, state)?;
    draw_controls_hint(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_height(state).saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Coordinate helpers ────────────────────────────────────────────────────────

fn term_width(state: &GameState) -> u16 {
    state.width + 2
}

fn term_height(state: &GameState) -> u16 {
    state.height + 4
}

/// Logical center of `rect`, rounded to a terminal cell.
fn cell(rect: &Rect, state: &GameState) -> (u16, u16) {
    let x = rect.cx.round().clamp(0.0, (state.width.saturating_sub(1)) as f32) as u16;
    let y = rect.cy.round().clamp(0.0, (state.height.saturating_sub(1)) as f32) as u16;
    (x + OFF_X, y + OFF_Y)
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let tw = term_width(state) as usize;
    let th = term_height(state);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(tw.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, th.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(tw.saturating_sub(2)))))?;

    for row in 2..th.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(term_width(state).saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    // Active area-effect countdown — right side
    if let Some(area) = &state.area_effect {
        let tag = format!("[AREA {:>2}s]", area.life / 50 + 1);
        let rx = term_width(state).saturating_sub(tag.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_AREA_TAG))?;
        out.queue(Print(&tag))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn facing_glyph(facing: Facing) -> &'static str {
    match facing {
        Facing::East => "→",
        Facing::NorthEast => "↗",
        Facing::North => "↑",
        Facing::NorthWest => "↖",
        Facing::West => "←",
        Facing::SouthWest => "↙",
        Facing::South => "↓",
        Facing::SouthEast => "↘",
    }
}

fn draw_player<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (glyph, color) = match state.player.look {
        Look::Directional => (facing_glyph(state.player.facing), C_PLAYER),
        Look::Happy => ("☺", C_PLAYER_HAPPY),
        Look::Sad => ("☹", C_PLAYER_SAD),
    };
    let (x, y) = cell(&state.player.rect, state);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, field_width: u16) -> std::io::Result<()> {
    let (glyphs, color) = match enemy.state {
        DescentState::Descending => ("«▼»", C_ENEMY_DESCENDING),
        DescentState::Stopped => ("«◆»", C_ENEMY_STOPPED),
    };
    // 3-wide sprite centered on the enemy column
    let cx = enemy.rect.cx.round().clamp(1.0, (field_width.saturating_sub(2)) as f32) as u16;
    let cy = enemy.rect.cy.max(0.0).round() as u16;
    out.queue(cursor::MoveTo(cx - 1 + OFF_X, cy + OFF_Y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyphs))?;
    Ok(())
}

fn bomb_color(color: BombColor) -> Color {
    match color {
        BombColor::Red => Color::Red,
        BombColor::Green => Color::Green,
        BombColor::Blue => Color::Blue,
        BombColor::Yellow => Color::Yellow,
        BombColor::Magenta => Color::Magenta,
        BombColor::Cyan => Color::Cyan,
    }
}

fn draw_bomb<W: Write>(out: &mut W, bomb: &Bomb, state: &GameState) -> std::io::Result<()> {
    let glyph = match bomb.radius {
        1 => "∙",
        2 => "●",
        _ => "⬤",
    };
    let (x, y) = cell(&bomb.rect, state);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(bomb_color(bomb.color)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_beam<W: Write>(out: &mut W, beam: &Beam, state: &GameState) -> std::io::Result<()> {
    // Rotated visual: pick the arrow matching the firing angle's octant
    const ARROWS: [&str; 8] = ["→", "↗", "↑", "↖", "←", "↙", "↓", "↘"];
    let octant = ((beam.angle_deg.rem_euclid(360.0) / 45.0).round() as usize) % 8;
    let (x, y) = cell(&beam.rect, state);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(C_BEAM))?;
    out.queue(Print(ARROWS[octant]))?;
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    explosion: &Explosion,
    state: &GameState,
) -> std::io::Result<()> {
    // Two-frame flicker driven by the remaining life
    let (glyph, color) = if (explosion.life / 10) % 2 == 0 {
        ("✸", Color::Yellow)
    } else {
        ("✦", Color::Red)
    };
    let (x, y) = cell(&explosion.rect, state);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Sparse dark hatch over the whole playfield — the terminal stand-in for
/// a semi-transparent overlay.
fn draw_area_effect<W: Write>(
    out: &mut W,
    _area: &AreaEffect,
    state: &GameState,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_AREA))?;
    for row in (0..state.height).step_by(2) {
        for col in ((row as usize / 2 % 2)..state.width as usize).step_by(2) {
            out.queue(cursor::MoveTo(col as u16 + OFF_X, row + OFF_Y))?;
            out.queue(Print("░"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term_height(state).saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "Arrows : Move   SHIFT : Boost   SPACE : Beam   CTRL+SPACE : Barrage   ENTER : Area   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);

    let lines: &[&str] = &[
        "╔════════════════════╗",
        "║    GAME  OVER      ║",
        "╚════════════════════╝",
    ];

    let cx = term_width(state) / 2;
    let total_rows = lines.len() as u16 + 1;
    let start_row = (term_height(state) / 2).saturating_sub(total_rows / 2);

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (i, msg) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    Ok(())
}
