/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current state
/// (and, where needed, an RNG handle) and returns brand-new values.  Side
/// effects are limited to the injected RNG, so tests drive everything
/// deterministically with a seeded `StdRng`.

use rand::Rng;

use crate::entities::{
    AreaEffect, Beam, Bomb, BombColor, DescentState, Enemy, Explosion, Facing, FrameInput,
    GameState, GameStatus, HeldKeys, Look, Player,
};
use crate::geometry::{direction_to, in_bounds, Rect, Vec2};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// One new enemy appears every this many ticks.
pub const ENEMY_SPAWN_INTERVAL: u64 = 200;
/// Score cost of triggering the area effect.
pub const AREA_EFFECT_COST: u32 = 200;
/// Lifetime of the area effect, in ticks.
pub const AREA_EFFECT_LIFE: i32 = 400;
pub const ENEMY_KILL_POINTS: u32 = 10;
pub const BOMB_KILL_POINTS: u32 = 1;
pub const ENEMY_EXPLOSION_LIFE: i32 = 100;
pub const BOMB_EXPLOSION_LIFE: i32 = 50;
/// Speed multiplier while the boost modifier is held.
pub const BOOST_FACTOR: f32 = 1.8;
/// Fan-fire parameters for the spread modifier: 10 beams over a full circle.
pub const SPREAD_BEAM_COUNT: usize = 10;
pub const SPREAD_TOTAL_DEG: f32 = 360.0;

/// Cells per tick.  The playfield is a terminal grid, so speeds are
/// fractional and positions accumulate in `f32`.
pub const PLAYER_BASE_SPEED: f32 = 0.8;
pub const BEAM_SPEED: f32 = 1.0;
pub const BOMB_SPEED: f32 = 0.4;
pub const ENEMY_DESCENT_SPEED: f32 = 0.2;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for the given screen dimensions.
pub fn init_state(width: u16, height: u16) -> GameState {
    let w = width as f32;
    let h = height as f32;
    GameState {
        player: Player {
            // Lower-right start, clear of the top spawn row
            rect: Rect::new(w * 0.8, h * 0.6, 1.0, 1.0),
            facing: Facing::East,
            base_speed: PLAYER_BASE_SPEED,
            look: Look::Directional,
        },
        enemies: Vec::new(),
        bombs: Vec::new(),
        beams: Vec::new(),
        explosions: Vec::new(),
        area_effect: None,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
    }
}

/// Spawn one enemy at a random column on the top row.  Its stop altitude
/// and bomb-drop interval are drawn here, once, and never change.
pub fn spawn_enemy(rng: &mut impl Rng, width: f32, height: f32) -> Enemy {
    let x = rng.gen_range(1.5..(width - 1.5));
    let max_bound = (height / 2.0).max(3.0);
    Enemy {
        rect: Rect::new(x, 0.0, 3.0, 1.0),
        vy: ENEMY_DESCENT_SPEED,
        bound: rng.gen_range(2.0..max_bound),
        state: DescentState::Descending,
        interval: rng.gen_range(50..=300),
    }
}

/// Spawn a bomb below `enemy`, aimed at the player's position right now.
/// The direction is computed once; the bomb never re-aims.
pub fn spawn_bomb(rng: &mut impl Rng, enemy: &Enemy, player: &Player) -> Bomb {
    let radius = rng.gen_range(1..=3u8);
    let color = BombColor::ALL[rng.gen_range(0..BombColor::ALL.len())];
    Bomb {
        rect: Rect::new(
            enemy.rect.cx,
            enemy.rect.cy + enemy.rect.h / 2.0,
            radius as f32,
            radius as f32,
        ),
        dir: direction_to(&enemy.rect, &player.rect),
        speed: BOMB_SPEED,
        radius,
        color,
    }
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// A beam leaving the player at `angle_deg` (math convention, y-up).
fn beam_at_angle(player: &Player, angle_deg: f32) -> Beam {
    let rad = angle_deg.to_radians();
    let vel = Vec2::new(rad.cos(), -rad.sin());
    Beam {
        rect: Rect::new(
            player.rect.cx + player.rect.w * vel.x,
            player.rect.cy + player.rect.h * vel.y,
            1.0,
            1.0,
        ),
        vel,
        speed: BEAM_SPEED,
        angle_deg,
    }
}

/// One beam along the player's facing direction.
pub fn fire_single(player: &Player) -> Beam {
    beam_at_angle(player, player.facing.angle_deg())
}

/// `n` beams at equal angular steps spanning `spread_deg`, centered on the
/// player's facing angle.  `n <= 1` degenerates to a single beam.
pub fn fire_spread(player: &Player, n: usize, spread_deg: f32) -> Vec<Beam> {
    if n <= 1 {
        return vec![fire_single(player)];
    }
    let center = player.facing.angle_deg();
    let start = -spread_deg / 2.0;
    let step = spread_deg / (n - 1) as f32;
    (0..n)
        .map(|i| beam_at_angle(player, center + start + step * i as f32))
        .collect()
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Move the player from the currently held keys.
///
/// Unit deltas of all held directional keys are summed, scaled by the
/// (possibly boosted) speed, and applied per axis; an axis that would
/// leave the screen is reverted on its own, so the player slides along
/// edges instead of sticking to them.  A non-zero accumulator snaps the
/// facing to the matching 8-way direction and restores the directional
/// sprite.
pub fn update_player(player: &Player, held: &HeldKeys, width: f32, height: f32) -> Player {
    let mut sum_x: i32 = 0;
    let mut sum_y: i32 = 0;
    if held.left {
        sum_x -= 1;
    }
    if held.right {
        sum_x += 1;
    }
    if held.up {
        sum_y -= 1;
    }
    if held.down {
        sum_y += 1;
    }

    let speed = if held.boost {
        player.base_speed * BOOST_FACTOR
    } else {
        player.base_speed
    };
    let dx = speed * sum_x as f32;
    let dy = speed * sum_y as f32;

    let mut rect = player.rect.shifted(dx, dy);
    let (horizontal, vertical) = in_bounds(&rect, width, height);
    if !horizontal {
        rect = rect.shifted(-dx, 0.0);
    }
    if !vertical {
        rect = rect.shifted(0.0, -dy);
    }

    let (facing, look) = match Facing::from_signs(sum_x, sum_y) {
        Some(f) => (f, Look::Directional),
        None => (player.facing, player.look),
    };

    Player {
        rect,
        facing,
        look,
        base_speed: player.base_speed,
    }
}

/// Attempt to trigger the area effect.  No-op unless the score covers the
/// cost and no effect is currently active; on success the cost is deducted
/// and a fresh full-screen effect is installed.
pub fn try_activate_area(state: &GameState) -> GameState {
    if state.score < AREA_EFFECT_COST || state.area_effect.is_some() {
        return state.clone();
    }
    GameState {
        score: state.score - AREA_EFFECT_COST,
        area_effect: Some(AreaEffect {
            life: AREA_EFFECT_LIFE,
        }),
        ..state.clone()
    }
}

/// Advance an enemy one tick: descend until the center passes the stop
/// altitude, then halt for good.  The transition is one-way.
pub fn update_enemy(enemy: &Enemy) -> Enemy {
    let (vy, state) = if enemy.rect.cy > enemy.bound {
        (0.0, DescentState::Stopped)
    } else {
        (enemy.vy, enemy.state)
    };
    Enemy {
        rect: enemy.rect.shifted(0.0, vy),
        vy,
        state,
        ..enemy.clone()
    }
}

// ── Per-tick simulation (nearly pure — RNG is injected) ──────────────────────

/// Advance the simulation by one tick.
///
/// Fixed order: discrete fire / activation events, timed spawns, collision
/// resolution (beam×enemy, beam×bomb, player×bomb), then movement and
/// aging for every collection.  All timers key off the pre-increment
/// frame counter, so tick 0 already spawns the first enemy.
pub fn tick(state: &GameState, input: &FrameInput, rng: &mut impl Rng) -> GameState {
    let width = state.width as f32;
    let height = state.height as f32;
    let mut next = state.clone();

    // ── 1. Discrete input events ─────────────────────────────────────────────
    if input.fire_spread {
        next.beams
            .extend(fire_spread(&next.player, SPREAD_BEAM_COUNT, SPREAD_TOTAL_DEG));
    } else if input.fire {
        next.beams.push(fire_single(&next.player));
    }
    if input.activate_area {
        next = try_activate_area(&next);
    }

    // ── 2. Timed spawns ──────────────────────────────────────────────────────
    if state.frame % ENEMY_SPAWN_INTERVAL == 0 {
        next.enemies.push(spawn_enemy(rng, width, height));
    }

    let drops: Vec<Bomb> = next
        .enemies
        .iter()
        .filter(|e| e.state == DescentState::Stopped && state.frame % e.interval == 0)
        .map(|e| spawn_bomb(rng, e, &next.player))
        .collect();
    next.bombs.extend(drops);

    // ── 3. Collision: beams ↔ enemies ────────────────────────────────────────
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut used_beams: Vec<usize> = Vec::new();

    for (bi, beam) in next.beams.iter().enumerate() {
        for (ei, enemy) in next.enemies.iter().enumerate() {
            if killed_enemies.contains(&ei) {
                continue;
            }
            if beam.rect.overlaps(&enemy.rect) {
                killed_enemies.push(ei);
                used_beams.push(bi);
                break;
            }
        }
    }

    for &ei in &killed_enemies {
        let e = &next.enemies[ei];
        next.explosions.push(Explosion {
            rect: Rect::new(e.rect.cx, e.rect.cy, 1.0, 1.0),
            life: ENEMY_EXPLOSION_LIFE,
        });
    }
    next.score += ENEMY_KILL_POINTS * killed_enemies.len() as u32;
    if !killed_enemies.is_empty() {
        next.player.look = Look::Happy;
    }

    next.enemies = next
        .enemies
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_enemies.contains(i))
        .map(|(_, e)| e.clone())
        .collect();
    next.beams = next
        .beams
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_beams.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    // ── 4. Collision: beams ↔ bombs ──────────────────────────────────────────
    let mut killed_bombs: Vec<usize> = Vec::new();
    let mut used_beams: Vec<usize> = Vec::new();

    for (bi, beam) in next.beams.iter().enumerate() {
        for (oi, bomb) in next.bombs.iter().enumerate() {
            if killed_bombs.contains(&oi) {
                continue;
            }
            if beam.rect.overlaps(&bomb.rect) {
                killed_bombs.push(oi);
                used_beams.push(bi);
                break;
            }
        }
    }

    for &oi in &killed_bombs {
        let b = &next.bombs[oi];
        next.explosions.push(Explosion {
            rect: Rect::new(b.rect.cx, b.rect.cy, 1.0, 1.0),
            life: BOMB_EXPLOSION_LIFE,
        });
    }
    next.score += BOMB_KILL_POINTS * killed_bombs.len() as u32;

    next.bombs = next
        .bombs
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_bombs.contains(i))
        .map(|(_, b)| b.clone())
        .collect();
    next.beams = next
        .beams
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_beams.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    // ── 5. Collision: player ↔ bomb (loss condition) ─────────────────────────
    if let Some(hit) = next
        .bombs
        .iter()
        .position(|b| b.rect.overlaps(&next.player.rect))
    {
        next.bombs.remove(hit);
        next.player.look = Look::Sad;
        next.status = GameStatus::GameOver;
        // The tick ends here: no movement or aging after a fatal hit.
        return next;
    }

    // ── 6. Movement & aging ──────────────────────────────────────────────────
    next.player = update_player(&next.player, &input.held, width, height);

    next.beams = next
        .beams
        .iter()
        .filter_map(|b| {
            let rect = b.rect.shifted(b.speed * b.vel.x, b.speed * b.vel.y);
            if in_bounds(&rect, width, height) != (true, true) {
                None
            } else {
                Some(Beam { rect, ..b.clone() })
            }
        })
        .collect();

    next.enemies = next.enemies.iter().map(update_enemy).collect();

    if let Some(area) = next.area_effect.take() {
        let life = area.life - 1;
        if life >= 0 {
            // Every bomb intersecting the full-screen extent goes up in a
            // short explosion.  No points for these.
            let extent = Rect::new(width / 2.0, height / 2.0, width, height);
            let (caught, kept): (Vec<Bomb>, Vec<Bomb>) = next
                .bombs
                .drain(..)
                .partition(|b| b.rect.overlaps(&extent));
            for bomb in caught {
                next.explosions.push(Explosion {
                    rect: Rect::new(bomb.rect.cx, bomb.rect.cy, 1.0, 1.0),
                    life: BOMB_EXPLOSION_LIFE,
                });
            }
            next.bombs = kept;
            next.area_effect = Some(AreaEffect { life });
        }
        // On expiry the effect vanishes without touching anything.
    }

    next.bombs = next
        .bombs
        .iter()
        .filter_map(|b| {
            let rect = b.rect.shifted(b.speed * b.dir.x, b.speed * b.dir.y);
            if in_bounds(&rect, width, height) != (true, true) {
                None
            } else {
                Some(Bomb { rect, ..b.clone() })
            }
        })
        .collect();

    next.explosions = next
        .explosions
        .iter()
        .filter_map(|e| {
            let life = e.life - 1;
            if life < 0 {
                None
            } else {
                Some(Explosion { rect: e.rect, life })
            }
        })
        .collect();

    next.frame = state.frame + 1;
    next
}
