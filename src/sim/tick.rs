//! Per-frame tick
//!
//! The host calls `tick` with the real time since its previous call. The step is
//! clamped so a suspended tab or a slow frame can't leap the clock forward.

use super::engine::RoundEngine;
use crate::consts::*;
use crate::format_secs;
use crate::persistence::BestScoreStore;
use crate::ui::{EventSink, StateEvent, UiUpdate};

/// Clamp a host-supplied step into [0, MAX_TICK_DT]; garbage counts as zero
pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_TICK_DT)
    } else {
        0.0
    }
}

impl<S: BestScoreStore, E: EventSink> RoundEngine<S, E> {
    /// Advance the clock by `dt` seconds (clamped) and report
    pub fn tick(&mut self, dt: f64) {
        let dt = clamp_dt(dt);

        if !self.state.is_running() {
            self.sink.state(&StateEvent {
                dt,
                elapsed: self.state.elapsed,
                running: false,
            });
            return;
        }

        self.state.elapsed += dt;
        self.emit(UiUpdate {
            time_text: Some(format_secs(self.state.elapsed)),
            bar: Some(self.state.progress()),
            hot: Some(self.state.is_hot()),
            ..self.stats()
        });

        // AFK: settle the round as if the player had stopped
        if self.state.elapsed > AUTO_STOP_SECS {
            log::info!("Auto-stop at {}s", format_secs(self.state.elapsed));
            self.stop_round();
        }

        self.sink.state(&StateEvent {
            dt,
            elapsed: self.state.elapsed,
            running: self.state.is_running(),
        });
    }
}
