//! Game state and core session types
//!
//! Everything the engine mutates lives in `GameState`, which is serializable so a
//! host can snapshot a session.

use serde::{Deserialize, Serialize};

use super::rng::DeterministicRng;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock reset, waiting for start
    #[default]
    Idle,
    /// Clock advancing
    Running,
    /// Stop settled, waiting for the next round
    Resolve,
}

/// Decoy sweet-spot placed before the real target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    /// Decoy time (seconds), always earlier than the target
    pub at: f64,
    /// Half-width of the decoy band
    pub window: f64,
}

impl Trap {
    /// Whether a stop at `elapsed` lands in the decoy band
    pub fn catches(&self, elapsed: f64) -> bool {
        (elapsed - self.at).abs() <= self.window
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Seconds since the round started
    pub elapsed: f64,
    /// Goal time for this round (multiple of 0.05)
    pub target: f64,
    /// Tolerance half-width around the target
    pub window: f64,
    /// Round index (0-based), drives difficulty
    pub round: u32,
    pub score: u64,
    pub best: u64,
    /// Consecutive non-miss, non-trap stops
    pub streak: u32,
    pub multiplier: f64,
    /// Slow-mo charge in [0, 3]
    pub boost_charge: f64,
    /// Decoy for this round, if one was rolled
    pub trap: Option<Trap>,
    pub rng: DeterministicRng,
}

impl GameState {
    /// Fresh session state; the round itself is set up by the engine
    pub fn new(seed: u32, best: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            elapsed: 0.0,
            target: 5.0,
            window: WINDOW_BASE,
            round: 0,
            score: 0,
            best,
            streak: 0,
            multiplier: 1.0,
            boost_charge: 0.0,
            trap: None,
            rng: DeterministicRng::new(seed),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Signed distance from the target (positive = late)
    pub fn delta(&self) -> f64 {
        self.elapsed - self.target
    }

    /// Within the scoring window right now
    pub fn is_hot(&self) -> bool {
        self.delta().abs() <= self.window
    }

    /// Cyclic progress bar fraction
    pub fn progress(&self) -> f64 {
        (self.elapsed % BAR_PERIOD_SECS) / BAR_PERIOD_SECS
    }

    /// Break the streak (miss or trap)
    pub fn reset_streak(&mut self) {
        self.streak = 0;
        self.multiplier = 1.0;
    }
}
