/// All game entity types — pure data, no logic.

use std::f32::consts::FRAC_1_SQRT_2;

use crate::geometry::{Rect, Vec2};

// ── Player ────────────────────────────────────────────────────────────────────

/// One of the 8 canonical facing directions, in screen coordinates
/// (negative y is up).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::East,
        Facing::NorthEast,
        Facing::North,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
        Facing::South,
        Facing::SouthEast,
    ];

    /// Snap the signs of a per-axis movement accumulator to a facing.
    /// `(0, 0)` has no direction and returns `None`.
    pub fn from_signs(sx: i32, sy: i32) -> Option<Facing> {
        match (sx.signum(), sy.signum()) {
            (1, 0) => Some(Facing::East),
            (1, -1) => Some(Facing::NorthEast),
            (0, -1) => Some(Facing::North),
            (-1, -1) => Some(Facing::NorthWest),
            (-1, 0) => Some(Facing::West),
            (-1, 1) => Some(Facing::SouthWest),
            (0, 1) => Some(Facing::South),
            (1, 1) => Some(Facing::SouthEast),
            _ => None,
        }
    }

    /// Unit vector in screen coordinates (diagonals normalized).
    pub fn unit(self) -> Vec2 {
        let d = FRAC_1_SQRT_2;
        match self {
            Facing::East => Vec2::new(1.0, 0.0),
            Facing::NorthEast => Vec2::new(d, -d),
            Facing::North => Vec2::new(0.0, -1.0),
            Facing::NorthWest => Vec2::new(-d, -d),
            Facing::West => Vec2::new(-1.0, 0.0),
            Facing::SouthWest => Vec2::new(-d, d),
            Facing::South => Vec2::new(0.0, 1.0),
            Facing::SouthEast => Vec2::new(d, d),
        }
    }

    /// Facing angle in math convention (y-up): East = 0°, North = 90°.
    pub fn angle_deg(self) -> f32 {
        match self {
            Facing::East => 0.0,
            Facing::NorthEast => 45.0,
            Facing::North => 90.0,
            Facing::NorthWest => 135.0,
            Facing::West => 180.0,
            Facing::SouthWest => 225.0,
            Facing::South => 270.0,
            Facing::SouthEast => 315.0,
        }
    }
}

/// Which sprite class the player currently shows.
///
/// `Happy` / `Sad` are transient overrides set by kill / hit events.  They
/// are never auto-reverted; only the next facing change during a player
/// update switches back to `Directional`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Look {
    Directional,
    Happy,
    Sad,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub facing: Facing,
    pub base_speed: f32,
    pub look: Look,
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescentState {
    Descending,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    /// Vertical velocity; zeroed once the stop altitude is reached.
    pub vy: f32,
    /// Stop altitude, drawn once at spawn.
    pub bound: f32,
    pub state: DescentState,
    /// Bomb-drop period in ticks, drawn once at spawn.
    pub interval: u64,
}

// ── Projectiles & effects ─────────────────────────────────────────────────────

/// Bomb palette, chosen at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl BombColor {
    pub const ALL: [BombColor; 6] = [
        BombColor::Red,
        BombColor::Green,
        BombColor::Blue,
        BombColor::Yellow,
        BombColor::Magenta,
        BombColor::Cyan,
    ];
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    /// Unit direction toward the player's position at spawn time.
    /// Fixed for the bomb's lifetime — no homing.
    pub dir: Vec2,
    pub speed: f32,
    pub radius: u8,
    pub color: BombColor,
}

#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    /// Unit velocity derived from the firing angle.
    pub vel: Vec2,
    pub speed: f32,
    /// Firing angle in degrees (math convention, y-up); drives the
    /// rotated visual.
    pub angle_deg: f32,
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    /// Remaining ticks; removed once negative.  `(life / 10) % 2` selects
    /// the flicker frame.
    pub life: i32,
}

/// Screen-wide, time-limited overlay that destroys every bomb while
/// active.  At most one exists at a time (`Option` in the game state).
#[derive(Clone, Debug)]
pub struct AreaEffect {
    pub life: i32,
}

// ── Input snapshot ────────────────────────────────────────────────────────────

/// Directional + modifier keys currently held.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

/// Everything the simulation needs from input for one tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub held: HeldKeys,
    /// Discrete fire key-down this tick.
    pub fire: bool,
    /// Fire key-down with the spread modifier held.
    pub fire_spread: bool,
    /// Area-effect activation key-down this tick.
    pub activate_area: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// The entire game state.  Cloneable so pure update functions can return
/// a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    /// The single allowed area effect, while one is active.
    pub area_effect: Option<AreaEffect>,
    pub score: u32,
    pub status: GameStatus,
    /// Tick counter; all spawn / drop timers key off this.
    pub frame: u64,
    pub width: u16,
    pub height: u16,
}
