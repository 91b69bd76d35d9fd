//! Math Zuma - a spiral-path number-matching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (path, token chain, collisions, scoring)
//! - `highscores`: Leaderboard records behind a host-provided key-value store
//!
//! Rendering, input mapping and screens are host concerns; the library only
//! exposes `tick`/`shoot`/`swap` entry points and read-only state snapshots.

pub mod highscores;
pub mod sim;

pub use highscores::{Leaderboard, ScoreRecord};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Number of path segments; the path holds `PATH_SAMPLES + 1` points
    pub const PATH_SAMPLES: usize = 1000;
    /// Spiral loop count for the path
    pub const PATH_LOOPS: f32 = 3.0;
    /// Fraction of the shorter surface edge used as the spiral's outer radius
    pub const PATH_RADIUS_FACTOR: f32 = 0.45;
    /// How much the spiral radius shrinks from start to hazard
    pub const PATH_SHRINK: f32 = 0.8;

    /// Default playing surface
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Token visual radius in pixels; also drives the hit test
    pub const TOKEN_RADIUS: f32 = 20.0;
    /// Collision distance between a projectile and a token's path point
    pub const HIT_RADIUS: f32 = TOKEN_RADIUS * 1.5;
    /// Minimum normalized gap between neighboring tokens on the path
    pub const MIN_SPACING: f32 = 0.035;
    /// Gap ahead of the struck token for a mismatch insertion
    pub const INSERT_OFFSET: f32 = 0.03;

    /// Projectile speed in pixels per tick
    pub const PROJECTILE_SPEED: f32 = 12.0;
    /// Muzzle distance from the surface center
    pub const MUZZLE_OFFSET: f32 = 40.0;

    /// Base token advance speed (normalized path units per tick)
    pub const INITIAL_SPEED: f32 = 0.00025;
    /// Advance speed added per level
    pub const SPEED_INCREMENT: f32 = 0.00006;

    /// Tokens on the path at level 1 plus `TOKENS_PER_LEVEL` per level
    pub const BASE_TOKEN_COUNT: u32 = 12;
    pub const TOKENS_PER_LEVEL: u32 = 3;

    /// Points per removed token
    pub const POINTS_PER_TOKEN: u64 = 100;
    /// Energy gained on a successful chain clear
    pub const ENERGY_GAIN: u32 = 10;
    /// Energy lost on a mismatch (double the gain)
    pub const ENERGY_LOSS: u32 = ENERGY_GAIN * 2;
    /// Energy gauge ceiling
    pub const ENERGY_MAX: u32 = 100;
    /// Removal count at which a clear counts as a combo
    pub const COMBO_THRESHOLD: u32 = 3;

    /// Unforced draws match the target with this probability at level 1
    pub const MATCH_CHANCE_BASE: f64 = 0.9;
    /// Match probability lost per level
    pub const MATCH_CHANCE_STEP: f64 = 0.05;
    /// Match probability floor
    pub const MATCH_CHANCE_FLOOR: f64 = 0.65;
    /// Rejection-sampling attempt cap for non-matching draws
    pub const REJECTION_CAP: u32 = 20;

    /// Cosmetic palette size (token hue indices)
    pub const PALETTE_SIZE: u8 = 5;
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
