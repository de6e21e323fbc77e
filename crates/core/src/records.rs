//! High-score records.
//!
//! The core only talks to a [`RecordStore`]; persistence lives in the
//! implementations. Scores are kept per player name and only ever raised.

use std::collections::BTreeMap;

use crate::types::USERNAME_MAX_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub username: String,
    pub score: u32,
}

/// Keyed score storage.
pub trait RecordStore {
    fn get(&self, username: &str) -> Option<u32>;
    fn get_all(&self) -> BTreeMap<String, u32>;
    fn set(&mut self, username: &str, score: u32);
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn get(&self, username: &str) -> Option<u32> {
        (**self).get(username)
    }

    fn get_all(&self) -> BTreeMap<String, u32> {
        (**self).get_all()
    }

    fn set(&mut self, username: &str, score: u32) {
        (**self).set(username, score)
    }
}

/// Volatile store, used in tests and when no file store is available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRecordStore {
    records: BTreeMap<String, u32>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, username: &str) -> Option<u32> {
        self.records.get(username).copied()
    }

    fn get_all(&self) -> BTreeMap<String, u32> {
        self.records.clone()
    }

    fn set(&mut self, username: &str, score: u32) {
        self.records.insert(username.to_string(), score);
    }
}

/// Save `score` unless the player already holds a better one. Returns the stored best.
pub fn store_best<S: RecordStore + ?Sized>(store: &mut S, username: &str, score: u32) -> u32 {
    let best = store.get(username).map_or(score, |current| current.max(score));
    store.set(username, best);
    best
}

/// Best records first (ties by name), at most `limit` of them.
pub fn top_records<S: RecordStore + ?Sized>(store: &S, limit: usize) -> Vec<Record> {
    let mut records: Vec<Record> = store
        .get_all()
        .into_iter()
        .map(|(username, score)| Record { username, score })
        .collect();
    records.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.username.cmp(&b.username)));
    records.truncate(limit);
    records
}

/// Clean up a player name for display and storage.
///
/// Trims whitespace and drops angle brackets; empty or overlong names are rejected.
pub fn sanitize_username(raw: &str) -> Option<String> {
    let name: String = raw.trim().chars().filter(|c| !matches!(c, '<' | '>')).collect();
    let name = name.trim();
    if name.is_empty() || name.chars().count() > USERNAME_MAX_LEN {
        return None;
    }
    Some(name.to_string())
}
