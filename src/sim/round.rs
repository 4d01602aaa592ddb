//! Round setup: target, window and trap placement
//!
//! Draw order is part of the deterministic contract: target first, then the trap
//! roll (only from `TRAP_MIN_ROUND` on), then the trap offset.

use super::state::{GameState, Trap};
use crate::consts::*;
use crate::ui::RoundSetup;

/// Tolerance half-width for round `round`
pub fn window_for_round(round: u32) -> f64 {
    (WINDOW_BASE - f64::from(round) * WINDOW_SHRINK_PER_ROUND).clamp(WINDOW_MIN, WINDOW_MAX)
}

/// Roll the current round's target, window and trap into `state`
pub fn pick_target(state: &mut GameState) -> RoundSetup {
    let raw = TARGET_MIN + state.rng.next_float() * TARGET_SPAN;
    state.target = (raw / TARGET_STEP).round() * TARGET_STEP;

    // tighter window as you survive
    state.window = window_for_round(state.round);

    let armed = state.round >= TRAP_MIN_ROUND && state.rng.next_float() < TRAP_CHANCE;
    state.trap = if armed {
        let offset = TRAP_OFFSET_BASE + state.rng.next_float() * TRAP_OFFSET_SPAN;
        Some(Trap {
            at: (state.target - offset).clamp(TRAP_EARLIEST, state.target - TRAP_MIN_GAP),
            window: (state.window * TRAP_WINDOW_SCALE).clamp(TRAP_WINDOW_MIN, TRAP_WINDOW_MAX),
        })
    } else {
        None
    };

    log::info!(
        "Round {}: target {:.2}s window ±{:.3}s{}",
        state.round,
        state.target,
        state.window,
        state
            .trap
            .map(|t| format!(" trap {:.2}s", t.at))
            .unwrap_or_default()
    );

    RoundSetup {
        target: state.target,
        window: state.window,
        trap_at: state.trap.map(|t| t.at),
    }
}
