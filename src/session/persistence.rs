//! High score persistence.
//!
//! The on-disk format is a flat JSON object so other settings can share the
//! file; only the [`HIGH_SCORE_KEY`] entry is read or written.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{GameError, GameResult};

pub const HIGH_SCORE_KEY: &str = "highScore";

pub trait HighScoreStore {
    fn load_high_score(&self) -> GameResult<u32>;
    fn save_high_score(&mut self, score: u32) -> GameResult<()>;
}

/// JSON key-value file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> GameResult<Map<String, Value>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(GameError::StoreIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| GameError::StoreFormat {
            path: self.path.clone(),
            source,
        })
    }

    fn io_error(&self, source: std::io::Error) -> GameError {
        GameError::StoreIo {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for JsonFileStore {
    /// A missing file, missing key or non-numeric value reads as 0
    fn load_high_score(&self) -> GameResult<u32> {
        let entries = self.read_entries()?;
        let score = entries
            .get(HIGH_SCORE_KEY)
            .and_then(Value::as_u64)
            .map(|score| score.min(u32::MAX as u64) as u32)
            .unwrap_or(0);
        Ok(score)
    }

    /// A malformed file is replaced rather than blocking every later save
    fn save_high_score(&mut self, score: u32) -> GameResult<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err @ GameError::StoreFormat { .. }) => {
                tracing::warn!(error = %err, "overwriting unreadable high score file");
                Map::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(HIGH_SCORE_KEY.to_string(), Value::from(score));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_string_pretty(&entries).map_err(|source| {
            GameError::StoreFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|source| self.io_error(source))?;

        tracing::debug!(path = ?self.path, score, "high score saved");
        Ok(())
    }
}

/// Keeps the high score in memory; counts writes so callers can check the
/// write-through behaviour.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: u32,
    saves: usize,
}

impl MemoryStore {
    pub fn new(score: u32) -> Self {
        Self { score, saves: 0 }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> GameResult<u32> {
        Ok(self.score)
    }

    fn save_high_score(&mut self, score: u32) -> GameResult<()> {
        self.score = score;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert_eq!(store.load_high_score().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = JsonFileStore::new(&path);
        store.save_high_score(120).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_high_score().unwrap(), 120);
    }

    #[test]
    fn test_other_keys_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"theme": "dark", "highScore": 30}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load_high_score().unwrap(), 30);
        store.save_high_score(40).unwrap();

        let raw: Map<String, Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("theme"), Some(&Value::from("dark")));
        assert_eq!(raw.get(HIGH_SCORE_KEY), Some(&Value::from(40)));
    }

    #[test]
    fn test_non_numeric_value_reads_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"highScore": "lots"}"#).unwrap();

        assert_eq!(JsonFileStore::new(&path).load_high_score().unwrap(), 0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonFileStore::new(&path).load_high_score(),
            Err(GameError::StoreFormat { .. })
        ));
    }

    #[test]
    fn test_save_replaces_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        for corrupt in [r#"{"highScore": 4"#, "42", "[]"] {
            std::fs::write(&path, corrupt).unwrap();

            let mut store = JsonFileStore::new(&path);
            store.save_high_score(10).unwrap();
            assert_eq!(store.load_high_score().unwrap(), 10);
        }
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::new(5);
        assert_eq!(store.load_high_score().unwrap(), 5);
        store.save_high_score(10).unwrap();
        assert_eq!(store.load_high_score().unwrap(), 10);
        assert_eq!(store.saves(), 1);
    }
}
