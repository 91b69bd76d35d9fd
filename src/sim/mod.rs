//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (`Pcg32` from the run seed)
//! - Single-threaded; all mutation happens inside the tick handler
//! - Stable iteration order (queue index 0 = token closest to the hazard)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod path;
pub mod resolve;
pub mod state;
pub mod tick;
pub mod values;

pub use collision::detect_hit;
pub use level::choose_target;
pub use path::Path;
pub use resolve::{HitOutcome, resolve_hit};
pub use state::{GamePhase, GameState, Projectile, TickEvent, TickReport, Token};
pub use tick::tick;
pub use values::{GameMode, divisors_of, match_chance, matches, next_value};
