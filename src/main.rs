//! Math Zuma headless harness
//!
//! Drives the simulation with a simple aiming bot, which doubles as a soak
//! test for the tick loop. Usage: `math-zuma [seed] [levels]`.

use math_zuma::consts::*;
use math_zuma::highscores::{Leaderboard, MemoryStore, ScoreRecord};
use math_zuma::sim::{GameMode, GamePhase, GameState, TickEvent, matches, tick};

/// Ticks between bot shots
const SHOT_COOLDOWN: u32 = 30;
/// Safety cap per level
const MAX_TICKS: u32 = 200_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    let max_levels: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    log::info!("autoplay run: seed={seed} levels={max_levels}");

    let mut state = GameState::new(seed, GameMode::Multiples);
    state.start(None);
    state.begin_playing();

    let mut best_level = 1;
    loop {
        let outcome = play_level(&mut state);
        match outcome {
            TickEvent::Victory => {
                best_level = state.level;
                if state.level >= max_levels {
                    log::info!("stopping after level {}", state.level);
                    break;
                }
                state.next_level();
            }
            TickEvent::GameOver => {
                log::info!("bot lost on level {}", state.level);
                break;
            }
            TickEvent::None => {
                log::warn!("level {} hit the tick cap", state.level);
                break;
            }
        }
    }

    let mut store = MemoryStore::default();
    let mut board = Leaderboard::load(&store);
    let record = ScoreRecord::new("autoplay", state.score, state.mode, state.target, "-");
    if let Some(rank) = board.add_record(record) {
        board.save(&mut store);
        log::info!("final score {} ranked #{rank}", state.score);
    }

    println!(
        "seed {seed}: reached level {best_level}, score {}, energy {}",
        state.score, state.energy
    );
}

/// Tick one level to its terminal event, shooting on a fixed cadence
fn play_level(state: &mut GameState) -> TickEvent {
    let mut cooldown = 0u32;
    for _ in 0..MAX_TICKS {
        if state.phase == GamePhase::Playing {
            if cooldown == 0 {
                if let Some(angle) = pick_shot(state) {
                    state.shoot(angle);
                    cooldown = SHOT_COOLDOWN;
                }
            } else {
                cooldown -= 1;
            }
        }

        let report = tick(state, 1.0);
        if report.combo >= COMBO_THRESHOLD {
            log::debug!("combo x{}", report.combo);
        }
        if report.event != TickEvent::None {
            return report.event;
        }
    }
    TickEvent::None
}

/// Aim at the first live token whose match-status equals the loaded shot's
///
/// A matching shot goes for the hazard-most matching token to clear the
/// front of the chain; a non-matching shot is dumped onto a non-matching
/// token so it can't break up a clearable run. Swaps first when the on-deck
/// value is the better tool.
fn pick_shot(state: &mut GameState) -> Option<f32> {
    let shot_matches = matches(state.current_value, state.target, state.mode);
    if !shot_matches && matches(state.next_value, state.target, state.mode) {
        state.swap_current_and_next();
    }
    let shot_matches = matches(state.current_value, state.target, state.mode);

    let target_token = state
        .tokens
        .iter()
        .find(|t| t.pos >= 0.0 && matches(t.value, state.target, state.mode) == shot_matches)?;

    let point = state.path.point_at(target_token.pos);
    Some((point - state.path.center()).to_angle())
}
