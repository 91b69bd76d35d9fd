//! Leaderboard records and ranking
//!
//! The simulation core never touches a storage device. The host hands in
//! anything implementing [`KvStore`] (browser LocalStorage, a file, an
//! in-memory map for tests) and the leaderboard serializes itself through
//! it as JSON. Missing or corrupt data degrades to an empty list, never an
//! error.

use serde::{Deserialize, Serialize};

use crate::sim::GameMode;

/// Maximum number of records to keep
pub const MAX_RECORDS: usize = 30;

/// Storage key the leaderboard saves under
pub const STORAGE_KEY: &str = "math_zuma_leaderboard";

/// Minimal key-value storage contract the host implements
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u64,
    /// Mode label ("multiples"/"divisors")
    pub mode: String,
    pub target: u32,
    /// Display date, host-formatted
    pub date: String,
}

impl ScoreRecord {
    pub fn new(name: &str, score: u64, mode: GameMode, target: u32, date: &str) -> Self {
        Self {
            name: name.to_string(),
            score,
            mode: mode.as_str().to_string(),
            target,
            date: date.to_string(),
        }
    }
}

/// Top-N list, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub records: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Would this score make the list?
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.records.len() < MAX_RECORDS {
            return true;
        }
        self.records.last().map(|r| score > r.score).unwrap_or(true)
    }

    /// Insert a record in rank order; returns the 1-indexed rank achieved,
    /// or `None` if it didn't qualify
    pub fn add_record(&mut self, record: ScoreRecord) -> Option<usize> {
        if !self.qualifies(record.score) {
            return None;
        }

        let pos = self.records.iter().position(|r| record.score > r.score);
        let rank = match pos {
            Some(i) => {
                self.records.insert(i, record);
                i + 1
            }
            None => {
                self.records.push(record);
                self.records.len()
            }
        };
        self.records.truncate(MAX_RECORDS);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.records.first().map(|r| r.score)
    }

    /// Load from the host's store; corrupt or missing data yields an empty
    /// list
    pub fn load(store: &dyn KvStore) -> Self {
        match store.get(STORAGE_KEY) {
            Some(json) => match serde_json::from_str::<Leaderboard>(&json) {
                Ok(board) => {
                    log::info!("loaded {} leaderboard records", board.records.len());
                    board
                }
                Err(e) => {
                    log::warn!("leaderboard data corrupt ({e}), starting fresh");
                    Self::new()
                }
            },
            None => Self::new(),
        }
    }

    /// Save to the host's store, best-effort
    pub fn save(&self, store: &mut dyn KvStore) {
        match serde_json::to_string(self) {
            Ok(json) => store.set(STORAGE_KEY, &json),
            Err(e) => log::warn!("leaderboard encode failed: {e}"),
        }
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
