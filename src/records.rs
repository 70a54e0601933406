//! High score and max-tier counters kept between sessions.

use crate::engine::{Score, Tile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

#[derive(thiserror::Error, Debug)]
pub enum RecordsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed records file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    pub high_score: Score,
    /// Highest tile value ever reached.
    pub max_tier: Tile,
}

impl Records {
    /// Read records from `path`. A missing file means no game has been recorded yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RecordsError> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no records file, starting fresh");
                Ok(Records::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RecordsError> {
        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Raise the high score if `score` beats it. Returns whether it changed.
    pub fn observe_score(&mut self, score: Score) -> bool {
        if score > self.high_score {
            info!(previous = self.high_score, score, "new high score");
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Raise the max tier if `tile` beats it. Returns whether it changed.
    pub fn observe_tile(&mut self, tile: Tile) -> bool {
        if tile > self.max_tier {
            info!(previous = self.max_tier, tile, "new max tier unlocked");
            self.max_tier = tile;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let rec = Records::load(dir.path().join("records.json")).unwrap();
        assert_eq!(rec, Records::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let rec = Records { high_score: 1234, max_tier: 256 };
        rec.save(&path).unwrap();
        assert_eq!(Records::load(&path).unwrap(), rec);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(matches!(Records::load(&path), Err(RecordsError::Json(_))));
    }

    #[test]
    fn observe_only_raises() {
        let mut rec = Records::default();
        assert!(rec.observe_score(40));
        assert!(!rec.observe_score(40));
        assert!(!rec.observe_score(12));
        assert_eq!(rec.high_score, 40);

        assert!(rec.observe_tile(64));
        assert!(!rec.observe_tile(32));
        assert_eq!(rec.max_tier, 64);
    }
}
