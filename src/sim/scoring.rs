//! Scoring model
//!
//! Pure functions: the Gaussian score curve, grade bands, streak multiplier and
//! slow-mo accrual. Nothing here touches game state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Accuracy classification of a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Laser,
    Tight,
    Ok,
    Miss,
    /// Stopped inside the decoy window
    Trap,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Laser => "laser",
            Grade::Tight => "tight",
            Grade::Ok => "ok",
            Grade::Miss => "miss",
            Grade::Trap => "trap",
        }
    }

    /// Whether this stop keeps the streak alive
    pub fn extends_streak(&self) -> bool {
        !matches!(self, Grade::Miss | Grade::Trap)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points for stopping `delta` seconds off target
///
/// Gaussian falloff peaking at 1000 with `sigma = max(0.02, 0.6 * window)`.
pub fn score_for(delta: f64, window: f64) -> u64 {
    let sigma = (window * SIGMA_SCALE).max(SIGMA_MIN);
    let d = delta.abs();
    let s = (MAX_POINTS * (-(d * d) / (2.0 * sigma * sigma)).exp()).max(0.0);
    // NaN and underflow both land on zero
    if s.is_finite() { s.round() as u64 } else { 0 }
}

pub fn grade_for(delta: f64, window: f64) -> Grade {
    let d = delta.abs();
    if d <= window * LASER_BAND {
        Grade::Laser
    } else if d <= window * TIGHT_BAND {
        Grade::Tight
    } else if d <= window {
        Grade::Ok
    } else {
        Grade::Miss
    }
}

/// Slow-mo charge after a stop of `grade`, starting from `charge`
pub fn boost_accrual(charge: f64, grade: Grade) -> f64 {
    let gain = match grade {
        Grade::Laser => 1.2,
        Grade::Tight => 0.6,
        Grade::Ok => 0.2,
        Grade::Miss | Grade::Trap => 0.0,
    };
    (charge + gain).clamp(0.0, BOOST_MAX)
}

pub fn multiplier_for(streak: u32) -> f64 {
    let steps = f64::from(streak / STREAK_PER_STEP);
    (1.0 + steps * MULTIPLIER_STEP).clamp(1.0, MULTIPLIER_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dead_on_is_max() {
        for w in [0.035, 0.05, 0.11, 0.12] {
            assert_eq!(score_for(0.0, w), 1000);
        }
    }

    #[test]
    fn test_sigma_floor() {
        // window 0.02 would give sigma 0.012, floor lifts it to 0.02
        let floored = score_for(0.02, 0.02);
        let expected = (1000.0 * (-0.5f64).exp()).round() as u64;
        assert_eq!(floored, expected);
    }

    #[test]
    fn test_far_miss_scores_zero() {
        assert_eq!(score_for(5.0, 0.035), 0);
        assert_eq!(score_for(f64::NAN, 0.1), 0);
    }

    #[test]
    fn test_grade_bands() {
        let w = 0.1;
        assert_eq!(grade_for(0.0, w), Grade::Laser);
        assert_eq!(grade_for(-0.02, w), Grade::Laser);
        assert_eq!(grade_for(0.04, w), Grade::Tight);
        assert_eq!(grade_for(-0.08, w), Grade::Ok);
        assert_eq!(grade_for(0.1, w), Grade::Ok);
        assert_eq!(grade_for(0.1001, w), Grade::Miss);
    }

    #[test]
    fn test_laser_boundary_inclusive() {
        let w = 0.08;
        let edge = w * LASER_BAND;
        assert_eq!(grade_for(edge, w), Grade::Laser);
        assert_eq!(grade_for(-edge, w), Grade::Laser);
        assert_eq!(grade_for(edge + 1e-9, w), Grade::Tight);
    }

    #[test]
    fn test_multiplier_steps() {
        assert_eq!(multiplier_for(0), 1.0);
        assert_eq!(multiplier_for(2), 1.0);
        assert_eq!(multiplier_for(3), 1.5);
        assert_eq!(multiplier_for(5), 1.5);
        assert_eq!(multiplier_for(6), 2.0);
        assert_eq!(multiplier_for(18), 4.0);
        assert_eq!(multiplier_for(300), 4.0);
    }

    #[test]
    fn test_boost_accrual() {
        assert!((boost_accrual(0.0, Grade::Laser) - 1.2).abs() < 1e-12);
        assert!((boost_accrual(0.0, Grade::Tight) - 0.6).abs() < 1e-12);
        assert!((boost_accrual(0.0, Grade::Ok) - 0.2).abs() < 1e-12);
        assert_eq!(boost_accrual(1.0, Grade::Miss), 1.0);
        assert_eq!(boost_accrual(1.0, Grade::Trap), 1.0);
        assert_eq!(boost_accrual(2.5, Grade::Laser), BOOST_MAX);
    }

    #[test]
    fn test_grade_serializes_lowercase() {
        let json = serde_json::to_string(&Grade::Laser).unwrap();
        assert_eq!(json, "\"laser\"");
        assert_eq!(Grade::Trap.to_string(), "trap");
    }

    proptest! {
        #[test]
        fn prop_score_symmetric(delta in 0.0f64..2.0, window in 0.035f64..0.12) {
            prop_assert_eq!(score_for(delta, window), score_for(-delta, window));
        }

        #[test]
        fn prop_score_non_increasing(a in 0.0f64..1.0, b in 0.0f64..1.0, window in 0.035f64..0.12) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(score_for(near, window) >= score_for(far, window));
            prop_assert!(score_for(far, window) <= 1000);
        }

        #[test]
        fn prop_multiplier_in_set(streak in 0u32..1000) {
            let m = multiplier_for(streak);
            prop_assert!((1.0..=4.0).contains(&m));
            prop_assert_eq!((m * 2.0).fract(), 0.0);
        }
    }
}
