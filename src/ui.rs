//! UI update protocol
//!
//! The engine never draws anything. It reports partial `UiUpdate` records (every
//! field optional, consumers merge present fields over what they already show)
//! and a raw `StateEvent` each tick, both through an `EventSink`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format_secs;
use crate::sim::Grade;

/// Status line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ready,
    Running,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ready => "ready",
            Status::Running => "running",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-shot visual marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flash {
    Trap,
    Slow,
}

/// Target, window and trap for a freshly set up round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundSetup {
    pub target: f64,
    pub window: f64,
    /// Decoy time, `None` when the round has no trap
    pub trap_at: Option<f64>,
}

impl RoundSetup {
    /// Trap line, `None` hides it
    pub fn trap_text(&self) -> Option<String> {
        self.trap_at.map(|at| format!("trap: {}s", format_secs(at)))
    }
}

impl fmt::Display for RoundSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "target: {}s  |  window: ±{}s",
            format_secs(self.target),
            format_secs(self.window)
        )
    }
}

/// Settled result of a stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopOutcome {
    /// Clock value at the stop
    pub elapsed: f64,
    /// Signed offset from the target (positive = late)
    pub delta: f64,
    /// Points before the multiplier
    pub points: u64,
    pub multiplier: f64,
    pub grade: Grade,
    /// Points actually added to the score
    pub total: u64,
}

impl StopOutcome {
    pub fn is_late(&self) -> bool {
        self.delta >= 0.0
    }
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.grade == Grade::Trap {
            return write!(
                f,
                "trap: stopped {}s in the decoy window → 0 pts, streak reset",
                format_secs(self.elapsed)
            );
        }
        let sign = if self.is_late() { "+" } else { "" };
        write!(
            f,
            "stopped {}s (Δ {}{}s) → +{} pts (base {} ×{:.1}), {}",
            format_secs(self.elapsed),
            sign,
            format_secs(self.delta),
            self.total,
            self.points,
            self.multiplier,
            self.grade
        )
    }
}

/// Partial UI update
///
/// Absent fields mean "unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiUpdate {
    /// Clock readout, two decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_text: Option<String>,
    /// Progress bar fraction in [0, 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<f64>,
    /// Clock is inside the target window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_start: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_stop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    /// Display with one decimal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost_charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_setup: Option<RoundSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<StopOutcome>,
}

impl UiUpdate {
    /// Fold `newer` over `self`, keeping fields `newer` leaves out
    pub fn merge(&mut self, newer: &UiUpdate) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if newer.$field.is_some() {
                    self.$field = newer.$field.clone();
                })*
            };
        }
        take!(
            time_text, bar, hot, status, can_start, can_stop, score, best, streak,
            multiplier, boost_charge, round_setup, flash, outcome
        );
    }
}

/// Raw timing report, fired every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    /// Clamped step applied this tick (seconds)
    pub dt: f64,
    pub elapsed: f64,
    pub running: bool,
}

/// Where the engine reports
pub trait EventSink {
    fn ui(&mut self, update: &UiUpdate);

    fn state(&mut self, _event: &StateEvent) {}
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn ui(&mut self, _update: &UiUpdate) {}
}

/// Closure-backed sink; either callback may be left out
#[derive(Default)]
pub struct Callbacks<'a> {
    on_ui: Option<Box<dyn FnMut(&UiUpdate) + 'a>>,
    on_state: Option<Box<dyn FnMut(&StateEvent) + 'a>>,
}

impl<'a> Callbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_ui(mut self, f: impl FnMut(&UiUpdate) + 'a) -> Self {
        self.on_ui = Some(Box::new(f));
        self
    }

    pub fn on_state(mut self, f: impl FnMut(&StateEvent) + 'a) -> Self {
        self.on_state = Some(Box::new(f));
        self
    }
}

impl EventSink for Callbacks<'_> {
    fn ui(&mut self, update: &UiUpdate) {
        if let Some(f) = self.on_ui.as_mut() {
            f(update);
        }
    }

    fn state(&mut self, event: &StateEvent) {
        if let Some(f) = self.on_state.as_mut() {
            f(event);
        }
    }
}

/// Buffers everything it receives, for hosts that drain once per frame
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub updates: Vec<UiUpdate>,
    pub states: Vec<StateEvent>,
}

impl EventLog {
    /// All buffered updates merged into one
    pub fn merged(&self) -> UiUpdate {
        let mut acc = UiUpdate::default();
        for update in &self.updates {
            acc.merge(update);
        }
        acc
    }

    /// Outcomes in the order they were reported
    pub fn outcomes(&self) -> impl Iterator<Item = &StopOutcome> {
        self.updates.iter().filter_map(|u| u.outcome.as_ref())
    }

    pub fn clear(&mut self) {
        self.updates.clear();
        self.states.clear();
    }
}

impl EventSink for EventLog {
    fn ui(&mut self, update: &UiUpdate) {
        self.updates.push(update.clone());
    }

    fn state(&mut self, event: &StateEvent) {
        self.states.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut shown = UiUpdate {
            score: Some(10),
            status: Some(Status::Ready),
            ..Default::default()
        };
        shown.merge(&UiUpdate {
            status: Some(Status::Running),
            can_stop: Some(true),
            ..Default::default()
        });
        assert_eq!(shown.score, Some(10));
        assert_eq!(shown.status, Some(Status::Running));
        assert_eq!(shown.can_stop, Some(true));
    }

    #[test]
    fn test_serialize_skips_absent() {
        let update = UiUpdate {
            hot: Some(true),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"hot":true}"#);
        let back: UiUpdate = serde_json::from_str(r#"{"hot":true}"#).unwrap();
        assert_eq!(back, update);
    }

    #[test]
    fn test_status_text_matches_serde() {
        for status in [Status::Ready, Status::Running] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_event_log_clear() {
        let mut log = EventLog::default();
        log.ui(&UiUpdate::default());
        log.state(&StateEvent {
            dt: 0.01,
            elapsed: 0.0,
            running: false,
        });
        log.clear();
        assert!(log.updates.is_empty());
        assert!(log.states.is_empty());
    }

    #[test]
    fn test_round_setup_text() {
        let setup = RoundSetup {
            target: 5.05,
            window: 0.11,
            trap_at: Some(4.2),
        };
        assert_eq!(setup.to_string(), "target: 5.05s  |  window: ±0.11s");
        assert_eq!(setup.trap_text().as_deref(), Some("trap: 4.20s"));
        let plain = RoundSetup { trap_at: None, ..setup };
        assert_eq!(plain.trap_text(), None);
    }

    #[test]
    fn test_outcome_text() {
        let hit = StopOutcome {
            elapsed: 5.07,
            delta: 0.02,
            points: 982,
            multiplier: 1.0,
            grade: Grade::Laser,
            total: 982,
        };
        assert_eq!(
            hit.to_string(),
            "stopped 5.07s (Δ +0.02s) → +982 pts (base 982 ×1.0), laser"
        );
        let early = StopOutcome { delta: -0.3, grade: Grade::Miss, ..hit };
        assert!(early.to_string().contains("(Δ -0.30s)"));
        let trap = StopOutcome { grade: Grade::Trap, points: 0, total: 0, ..hit };
        assert!(trap.to_string().starts_with("trap:"));
    }

    #[test]
    fn test_callbacks_forward() {
        let mut seen = Vec::new();
        let mut ticks = 0;
        {
            let mut sink = Callbacks::new()
                .on_ui(|u: &UiUpdate| seen.push(u.clone()))
                .on_state(|_: &StateEvent| ticks += 1);
            sink.ui(&UiUpdate::default());
            sink.state(&StateEvent {
                dt: 0.0,
                elapsed: 0.0,
                running: false,
            });
        }
        assert_eq!(seen.len(), 1);
        assert_eq!(ticks, 1);
    }
}
