//! Level setup and difficulty scaling
//!
//! A level is a fresh token population plus a reset session: score, energy,
//! projectiles and the identity counter all start over, and the advance
//! speed ramps linearly with the level number.

use rand::Rng;

use super::state::{GameState, Token};
use super::values::{self, GameMode};
use crate::consts::*;

/// Divisor-mode targets; composite numbers with rich divisor sets so
/// matching draws stay varied
pub const DIVISOR_TARGETS: [u32; 10] = [12, 16, 18, 20, 24, 30, 36, 40, 48, 60];

/// Pick a level target when the player didn't supply one
pub fn choose_target<R: Rng>(rng: &mut R, mode: GameMode) -> u32 {
    match mode {
        GameMode::Multiples => rng.random_range(2..=9),
        GameMode::Divisors => DIVISOR_TARGETS[rng.random_range(0..DIVISOR_TARGETS.len())],
    }
}

/// Populate a level: target, token chain, speed, and a primed shooter
///
/// `target` of `None` draws one for the session's mode. The initial chain is
/// generated back-to-front at exactly the minimum spacing, alternating
/// forced match/non-match values 2:1 so the opening board is always
/// playable. The first loaded shot is forced to match for the same reason.
pub fn init_level(state: &mut GameState, level: u32, target: Option<u32>) {
    let target = target.unwrap_or_else(|| choose_target(&mut state.rng, state.mode));

    state.target = target;
    state.level = level;
    state.score = 0;
    state.energy = 0;
    state.speed = INITIAL_SPEED + (level - 1) as f32 * SPEED_INCREMENT;
    state.projectiles.clear();
    state.tokens.clear();
    state.reset_token_ids();

    let count = BASE_TOKEN_COUNT + level * TOKENS_PER_LEVEL;
    for i in 0..count {
        // Two forced matches for every forced non-match
        let force = Some(i % 3 != 1);
        let value = values::next_value(&mut state.rng, target, state.mode, level, force);
        let id = state.next_token_id();
        let hue = state.roll_hue();
        state.tokens.push(Token {
            id,
            value,
            pos: -(i as f32) * MIN_SPACING,
            hue,
        });
    }

    state.current_value = values::next_value(&mut state.rng, target, state.mode, level, Some(true));
    state.next_value = values::next_value(&mut state.rng, target, state.mode, level, None);

    log::info!(
        "level {} init: mode={} target={} tokens={} speed={:.5}",
        level,
        state.mode.as_str(),
        target,
        count,
        state.speed
    );
}
