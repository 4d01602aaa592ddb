//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod engine;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod state;
pub mod tick;

pub use engine::{EngineConfig, RoundEngine};
pub use rng::DeterministicRng;
pub use round::{pick_target, window_for_round};
pub use scoring::{Grade, boost_accrual, grade_for, multiplier_for, score_for};
pub use state::{GamePhase, GameState, Trap};
