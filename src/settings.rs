//! Host settings
//!
//! Persisted as JSON next to the best-score file. Missing or broken settings
//! fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::EngineConfig;

/// Default settings file name
pub const SETTINGS_FILE: &str = "stop_timer_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; random when unset
    pub seed: Option<u32>,
    /// Where the best score lives
    pub best_score_path: PathBuf,

    // === Demo host ===
    /// Ticks per second the demo driver feeds the engine
    pub frame_rate: u32,
    /// Rounds the demo player plays before exiting
    pub rounds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            best_score_path: PathBuf::from("stop_timer_best.json"),
            frame_rate: 60,
            rounds: 8,
        }
    }
}

impl Settings {
    /// Load settings from `path`, defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Could not save settings to {}: {}", path.display(), e);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }

    /// Seconds per demo tick
    pub fn frame_dt(&self) -> f64 {
        1.0 / f64::from(self.frame_rate.max(1))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig { seed: self.seed }
    }
}
