//! Game state and core simulation types
//!
//! Everything that must survive a snapshot lives here. The token queue and
//! projectile set are exclusively owned by the running session; collaborators
//! only ever see them through shared references.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::path::Path;
use super::values::GameMode;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Mode/target selection, nothing simulated yet
    Menu,
    /// Level initialized, rules shown, waiting for the player to start
    Briefing,
    /// Active gameplay
    Playing,
    /// Simulation frozen at its last-ticked values
    Paused,
    /// A token reached the hazard
    GameOver,
    /// The queue was cleared
    Victory,
}

/// A numeric token traveling along the path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: u32,
    pub value: u32,
    /// Normalized path progress; negative means not yet live on the path
    pub pos: f32,
    /// Cosmetic palette index (no gameplay meaning)
    pub hue: u8,
}

/// An in-flight shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub value: u32,
}

/// Terminal event produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickEvent {
    #[default]
    None,
    GameOver,
    Victory,
}

/// What one tick did, for UI/cosmetic reaction
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    pub event: TickEvent,
    /// Points awarded this tick
    pub score_delta: u64,
    /// Net energy change this tick (clamping already applied)
    pub energy_delta: i32,
    /// Largest chain removed this tick; >= `COMBO_THRESHOLD` is a combo
    pub combo: u32,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; every draw goes through here
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub mode: GameMode,
    /// The number tokens are matched against
    pub target: u32,
    /// Monotonically non-decreasing within a level
    pub score: u64,
    /// Secondary gauge, always in 0..=ENERGY_MAX
    pub energy: u32,
    pub level: u32,
    /// Token advance speed, normalized path units per tick
    pub speed: f32,
    /// Ordered token chain; index 0 is closest to the hazard
    pub tokens: Vec<Token>,
    pub projectiles: Vec<Projectile>,
    /// Value loaded in the shooter
    pub current_value: u32,
    /// Value on deck
    pub next_value: u32,
    /// Spiral path for the current surface size
    pub path: Path,
    /// Next token identity
    next_id: u32,
}

impl GameState {
    /// Create a session in the menu phase for the default surface
    pub fn new(seed: u64, mode: GameMode) -> Self {
        Self::with_surface(seed, mode, SURFACE_WIDTH, SURFACE_HEIGHT)
    }

    /// Create a session in the menu phase for a specific surface size
    pub fn with_surface(seed: u64, mode: GameMode, width: f32, height: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            mode,
            target: 0,
            score: 0,
            energy: 0,
            level: 1,
            speed: INITIAL_SPEED,
            tokens: Vec::new(),
            projectiles: Vec::new(),
            current_value: 0,
            next_value: 0,
            path: Path::build(width, height),
            next_id: 0,
        }
    }

    /// Allocate a token identity
    pub fn next_token_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset the identity counter (level start)
    pub(crate) fn reset_token_ids(&mut self) {
        self.next_id = 0;
    }

    /// Rebuild the path after a surface resize; token positions are
    /// normalized and stay valid
    pub fn resize(&mut self, width: f32, height: f32) {
        self.path = Path::build(width, height);
    }

    /// Random palette index for a freshly spawned token
    pub fn roll_hue(&mut self) -> u8 {
        self.rng.random_range(0..PALETTE_SIZE)
    }

    /// Raise energy, clamped to the gauge ceiling
    pub fn gain_energy(&mut self, amount: u32) -> i32 {
        let before = self.energy;
        self.energy = (self.energy + amount).min(ENERGY_MAX);
        (self.energy - before) as i32
    }

    /// Drop energy, clamped at zero
    pub fn lose_energy(&mut self, amount: u32) -> i32 {
        let before = self.energy;
        self.energy = self.energy.saturating_sub(amount);
        -((before - self.energy) as i32)
    }

    /// Does any live token on the board satisfy the match predicate?
    pub fn board_has_match(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| super::values::matches(t.value, self.target, self.mode))
    }

    /// Restore the minimum-gap invariant by a cascading clamp
    ///
    /// Scans from the hazard end outward; any token closer than
    /// `MIN_SPACING` behind its predecessor is pushed back. A push can
    /// violate the next pair, which the same scan then fixes, so one pass
    /// suffices.
    pub fn enforce_spacing(&mut self) {
        for i in 1..self.tokens.len() {
            let limit = self.tokens[i - 1].pos - MIN_SPACING;
            if self.tokens[i].pos > limit {
                self.tokens[i].pos = limit;
            }
        }
    }
}
