//! Stop Timer - stop the clock as close to the target as you dare
//!
//! Core modules:
//! - `sim`: Deterministic round engine (RNG, scoring, state machine, tick)
//! - `ui`: Partial UI updates and the event sink the engine reports through
//! - `persistence`: Best-score storage
//! - `settings`: Host configuration

pub mod persistence;
pub mod settings;
pub mod sim;
pub mod ui;

pub use persistence::{BestScoreStore, FileStore, MemoryStore, StoreError};
pub use settings::Settings;
pub use sim::{DeterministicRng, EngineConfig, GamePhase, GameState, Grade, RoundEngine, Trap};
pub use ui::{Callbacks, EventSink, NullSink, StateEvent, UiUpdate};

/// Game tuning constants
pub mod consts {
    /// Largest time step a single tick may advance (seconds)
    pub const MAX_TICK_DT: f64 = 0.05;
    /// Running rounds are force-stopped once elapsed exceeds this
    pub const AUTO_STOP_SECS: f64 = 12.0;
    /// Progress bar wraps every this many seconds
    pub const BAR_PERIOD_SECS: f64 = 10.0;

    /// Target range and quantization step
    pub const TARGET_MIN: f64 = 2.8;
    pub const TARGET_SPAN: f64 = 6.2;
    pub const TARGET_STEP: f64 = 0.05;

    /// Tolerance window: starts at base, shrinks per round, clamped
    pub const WINDOW_BASE: f64 = 0.11;
    pub const WINDOW_SHRINK_PER_ROUND: f64 = 0.003;
    pub const WINDOW_MIN: f64 = 0.035;
    pub const WINDOW_MAX: f64 = 0.12;

    /// Traps appear from this round on
    pub const TRAP_MIN_ROUND: u32 = 3;
    pub const TRAP_CHANCE: f64 = 0.35;
    /// Trap sits `offset` seconds before the target, offset in [base, base + span)
    pub const TRAP_OFFSET_BASE: f64 = 0.35;
    pub const TRAP_OFFSET_SPAN: f64 = 0.8;
    /// Trap never earlier than this
    pub const TRAP_EARLIEST: f64 = 1.2;
    /// Trap never closer to the target than this
    pub const TRAP_MIN_GAP: f64 = 0.25;
    pub const TRAP_WINDOW_SCALE: f64 = 1.4;
    pub const TRAP_WINDOW_MIN: f64 = 0.06;
    pub const TRAP_WINDOW_MAX: f64 = 0.18;

    /// Peak points for a dead-on stop
    pub const MAX_POINTS: f64 = 1000.0;
    /// Gaussian falloff width as a fraction of the window, with a floor
    pub const SIGMA_SCALE: f64 = 0.60;
    pub const SIGMA_MIN: f64 = 0.02;

    /// Grade bands as fractions of the window
    pub const LASER_BAND: f64 = 0.25;
    pub const TIGHT_BAND: f64 = 0.60;

    /// Multiplier gains `MULTIPLIER_STEP` every `STREAK_PER_STEP` stops
    pub const STREAK_PER_STEP: u32 = 3;
    pub const MULTIPLIER_STEP: f64 = 0.5;
    pub const MULTIPLIER_MAX: f64 = 4.0;

    /// Slow-mo charge cap
    pub const BOOST_MAX: f64 = 3.0;
}

/// Format seconds the way the clock displays them
#[inline]
pub fn format_secs(secs: f64) -> String {
    format!("{secs:.2}")
}
