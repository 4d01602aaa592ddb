//! Best-score persistence
//!
//! The engine reads the best score once at construction and writes it whenever
//! the session score beats it. Failures are reported to the caller, which logs
//! them and carries on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("best score I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("best score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

pub trait BestScoreStore {
    fn load_best(&mut self) -> Result<u64, StoreError>;

    fn save_best(&mut self, best: u64) -> Result<(), StoreError>;
}

/// Keeps the best score in memory only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStore {
    pub best: u64,
}

impl MemoryStore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best(&mut self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
        self.best = best;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Serialize, Deserialize)]
struct BestRecord {
    best: u64,
}

/// JSON file holding `{"best": n}`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileStore {
    /// A missing file is a fresh install, not an error
    fn load_best(&mut self) -> Result<u64, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let record: BestRecord = serde_json::from_str(&json)?;
                log::info!("Loaded best score {} from {}", record.best, self.path.display());
                Ok(record.best)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&BestRecord { best })?;
        // write-then-rename so a crash never leaves a torn file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Best score {} saved", best);
        Ok(())
    }
}
