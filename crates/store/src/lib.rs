//! JSON file record store.
//!
//! Records live in a single JSON object mapping player names to their best
//! score:
//!
//! ```json
//! { "ann": 1500, "bob": 250 }
//! ```
//!
//! The file is read once on open and rewritten on every update. Entries that
//! are not non-negative integers are dropped with a warning rather than
//! failing the whole load; the game core never sees malformed data or I/O
//! errors.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::warn;
use serde_json::Value;

pub use tui_blockfall_core as core;

use crate::core::RecordStore;

/// Default file name, relative to the working directory.
pub const DEFAULT_RECORDS_FILE: &str = "blockfall-records.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: BTreeMap<String, u32>,
}

impl JsonFileStore {
    /// Load the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(text) => parse_records(&text)
                .with_context(|| format!("reading records from {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("opening {}", path.display()));
            }
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current records to disk.
    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing records to {}", self.path.display()))
    }
}

fn parse_records(text: &str) -> Result<BTreeMap<String, u32>> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let raw: Value = serde_json::from_str(text)?;
    let Value::Object(map) = raw else {
        bail!("expected a JSON object of name -> score");
    };

    let mut records = BTreeMap::new();
    for (name, value) in map {
        match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(score) => {
                records.insert(name, score);
            }
            None => warn!("skipping record for {:?}: {} is not a score", name, value),
        }
    }
    Ok(records)
}

impl RecordStore for JsonFileStore {
    fn get(&self, username: &str) -> Option<u32> {
        self.records.get(username).copied()
    }

    fn get_all(&self) -> BTreeMap<String, u32> {
        self.records.clone()
    }

    fn set(&mut self, username: &str, score: u32) {
        self.records.insert(username.to_string(), score);
        if let Err(err) = self.save() {
            warn!("{:#}", err);
        }
    }
}
