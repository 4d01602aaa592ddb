//! Round engine: owns the session state and applies player actions
//!
//! Actions that make no sense in the current phase are silent no-ops, so a UI can
//! wire buttons straight to them.

use super::round::pick_target;
use super::scoring::{Grade, boost_accrual, grade_for, multiplier_for, score_for};
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::format_secs;
use crate::persistence::BestScoreStore;
use crate::ui::{EventSink, Flash, Status, StopOutcome, UiUpdate};

/// Construction options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// RNG seed; a random one is drawn when unset
    pub seed: Option<u32>,
}

pub struct RoundEngine<S, E> {
    pub(super) state: GameState,
    pub(super) store: S,
    pub(super) sink: E,
    /// False when the stored best could not be read; writing then would clobber it
    persist_best: bool,
}

impl<S: BestScoreStore, E: EventSink> RoundEngine<S, E> {
    /// Read the best score, set up round 0 and report the opening UI
    pub fn new(config: EngineConfig, mut store: S, sink: E) -> Self {
        let (best, persist_best) = match store.load_best() {
            Ok(best) => (best, true),
            Err(e) => {
                log::warn!("Best score unreadable, not overwriting it this session: {}", e);
                (0, false)
            }
        };
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("Session seed: {}", seed);

        let mut engine = Self {
            state: GameState::new(seed, best),
            store,
            sink,
            persist_best,
        };
        let setup = pick_target(&mut engine.state);
        engine.emit(UiUpdate {
            round_setup: Some(setup),
            ..Default::default()
        });
        engine.reset_timer();
        engine.emit(UiUpdate {
            can_start: Some(true),
            can_stop: Some(false),
            ..engine.stats()
        });
        engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// Start the clock. Only valid from `Idle`; returns whether it started.
    pub fn start_round(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }
        self.state.phase = GamePhase::Running;
        self.state.elapsed = 0.0;
        self.emit(UiUpdate {
            status: Some(Status::Running),
            can_start: Some(false),
            can_stop: Some(true),
            ..Default::default()
        });
        true
    }

    /// Stop the clock and score the round. `None` when nothing was running.
    pub fn stop_round(&mut self) -> Option<StopOutcome> {
        if !self.state.is_running() {
            return None;
        }
        let st = &mut self.state;
        let elapsed = st.elapsed;
        let delta = st.delta();

        // the decoy wins over however close the real target was
        let (grade, points) = match st.trap {
            Some(trap) if trap.catches(elapsed) => (Grade::Trap, 0),
            _ => (grade_for(delta, st.window), score_for(delta, st.window)),
        };

        if grade.extends_streak() {
            st.streak = st.streak.saturating_add(1);
            st.multiplier = multiplier_for(st.streak);
            st.boost_charge = boost_accrual(st.boost_charge, grade);
        } else {
            st.reset_streak();
        }

        let total = (points as f64 * st.multiplier).round() as u64;
        st.score += total;
        st.phase = GamePhase::Resolve;

        let outcome = StopOutcome {
            elapsed,
            delta,
            points,
            multiplier: st.multiplier,
            grade,
            total,
        };
        log::debug!("Round {} stop: {}", st.round, outcome);

        if grade == Grade::Trap {
            self.emit(UiUpdate {
                flash: Some(Flash::Trap),
                ..Default::default()
            });
        }
        self.record_best();
        self.emit(UiUpdate {
            status: Some(Status::Ready),
            can_start: Some(false),
            can_stop: Some(false),
            outcome: Some(outcome),
            ..self.stats()
        });
        Some(outcome)
    }

    /// Move to the next round: new target, window and trap, clock reset.
    /// Callable from any phase; a running round is abandoned unscored.
    pub fn advance_round(&mut self) {
        if self.state.is_running() {
            log::debug!("Round {} abandoned", self.state.round);
        }
        self.state.round = self.state.round.saturating_add(1);
        let setup = pick_target(&mut self.state);
        self.emit(UiUpdate {
            round_setup: Some(setup),
            ..Default::default()
        });
        self.reset_timer();
        self.emit(UiUpdate {
            can_start: Some(true),
            can_stop: Some(false),
            ..Default::default()
        });
    }

    /// Spend one slow-mo charge. Only while running with charge left.
    ///
    /// The core only tracks the resource; any actual slowdown is up to the host.
    pub fn activate_boost(&mut self) -> bool {
        if !self.state.is_running() || self.state.boost_charge <= 0.0 {
            return false;
        }
        self.state.boost_charge = (self.state.boost_charge - 1.0).clamp(0.0, BOOST_MAX);
        log::debug!("Boost used, {:.1} left", self.state.boost_charge);
        self.emit(UiUpdate {
            boost_charge: Some(self.state.boost_charge),
            flash: Some(Flash::Slow),
            ..Default::default()
        });
        true
    }

    pub(super) fn emit(&mut self, update: UiUpdate) {
        self.sink.ui(&update);
    }

    /// Score panel fields
    pub(super) fn stats(&self) -> UiUpdate {
        UiUpdate {
            score: Some(self.state.score),
            best: Some(self.state.best),
            streak: Some(self.state.streak),
            multiplier: Some(self.state.multiplier),
            boost_charge: Some(self.state.boost_charge),
            ..Default::default()
        }
    }

    fn reset_timer(&mut self) {
        self.state.elapsed = 0.0;
        self.state.phase = GamePhase::Idle;
        self.emit(UiUpdate {
            time_text: Some(format_secs(0.0)),
            bar: Some(0.0),
            status: Some(Status::Ready),
            ..Default::default()
        });
    }

    /// Raise and persist the best score if the session beat it
    fn record_best(&mut self) {
        if self.state.score <= self.state.best {
            return;
        }
        self.state.best = self.state.score;
        log::info!("New best: {}", self.state.best);
        if !self.persist_best {
            return;
        }
        if let Err(e) = self.store.save_best(self.state.best) {
            log::warn!("Failed to save best score: {}", e);
        }
    }
}
