//! Hit resolution: the chain-clear rule
//!
//! The tricky part of Math Zuma. A removal needs BOTH predicates to hold:
//! the shot value and the struck token value must each match the target.
//! The removal set is the maximal strictly contiguous run of matching
//! tokens around the struck index; a single non-matching token bounds the
//! run on either side (no skip-ahead, no flood fill across gaps). Anything
//! else is a mismatch: the shot value joins the chain right where it hit
//! and energy pays double the clear reward.

use super::state::{GameState, Token};
use super::values::matches;
use crate::consts::*;

/// What resolving one hit did to the session
#[derive(Debug, Clone, Copy, Default)]
pub struct HitOutcome {
    /// True when a chain was cleared, false when the shot was inserted
    pub matched: bool,
    /// Tokens removed (0 on mismatch)
    pub removed: u32,
    /// Points awarded
    pub points: u64,
    /// Net energy change after clamping
    pub energy_delta: i32,
}

impl HitOutcome {
    /// A removal big enough to celebrate
    #[inline]
    pub fn is_combo(&self) -> bool {
        self.removed >= COMBO_THRESHOLD
    }
}

/// Resolve a projectile strike on the token at queue `index`
///
/// The projectile is already spent by the caller; this only mutates the
/// queue and the session scalars.
pub fn resolve_hit(state: &mut GameState, index: usize, shot_value: u32) -> HitOutcome {
    let target = state.target;
    let mode = state.mode;
    let hit_value = state.tokens[index].value;

    let shot_ok = matches(shot_value, target, mode);
    let hit_ok = matches(hit_value, target, mode);

    if shot_ok && hit_ok {
        // Walk toward the queue tail (away from the hazard)
        let mut end = index + 1;
        while end < state.tokens.len() && matches(state.tokens[end].value, target, mode) {
            end += 1;
        }
        // Walk toward the hazard
        let mut start = index;
        while start > 0 && matches(state.tokens[start - 1].value, target, mode) {
            start -= 1;
        }

        let removed = (end - start) as u32;
        let points = removed as u64 * POINTS_PER_TOKEN;
        state.tokens.drain(start..end);
        state.score += points;
        let energy_delta = state.gain_energy(ENERGY_GAIN);

        log::debug!(
            "chain clear: shot={} removed={} points={}",
            shot_value,
            removed,
            points
        );

        HitOutcome {
            matched: true,
            removed,
            points,
            energy_delta,
        }
    } else {
        // The errant shot becomes a token just behind the one it struck,
        // then the minimum-gap cascade tidies up the pile-up it causes.
        let pos = state.tokens[index].pos - INSERT_OFFSET;
        let id = state.next_token_id();
        let hue = state.roll_hue();
        state.tokens.insert(
            index,
            Token {
                id,
                value: shot_value,
                pos,
                hue,
            },
        );
        let energy_delta = state.lose_energy(ENERGY_LOSS);
        state.enforce_spacing();

        log::debug!("mismatch: shot={} inserted at {}", shot_value, index);

        HitOutcome {
            matched: false,
            removed: 0,
            points: 0,
            energy_delta,
        }
    }
}
