//! Append-only score history, stored as a JSON list.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use serde::{Deserialize, Serialize};

use crate::common::StoreError;
use crate::store::write_atomic;

const SCORE_FILE: &str = "scores.json";

/// One completed game: its shot count and when it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub shots: u32,
    /// Unix seconds at the time the score was recorded.
    pub timestamp: u64,
}

/// Durable, ordered list of completed-game scores.
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Open the score store under `data_dir`, creating the directory if
    /// needed. The file itself appears on the first recorded score.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        Ok(ScoreStore {
            path: data_dir.join(SCORE_FILE),
        })
    }

    /// Append a completed game's shot count. The whole list is rewritten
    /// atomically; an I/O failure leaves the previous list intact.
    pub fn record(&self, shots: u32) -> Result<(), StoreError> {
        let mut records = self.list()?;
        records.push(ScoreRecord {
            shots,
            timestamp: unix_now(),
        });
        let json =
            serde_json::to_vec_pretty(&records).map_err(|e| StoreError::Io(io::Error::other(e)))?;
        write_atomic(&self.path, &json)?;
        info!("recorded score of {} shots", shots);
        Ok(())
    }

    /// All recorded scores, oldest first.
    pub fn list(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Io(io::Error::other(e)))
    }

    /// Best (lowest) shot counts first, capped at `limit` entries.
    pub fn best(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut records = self.list()?;
        records.sort_by_key(|r| r.shots);
        records.truncate(limit);
        Ok(records)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
