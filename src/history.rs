//! Bounded local translation history.
//!
//! Stores (Korean source, chosen English translation) pairs as a JSON array,
//! newest first, capped at a fixed number of entries so the file never grows
//! unbounded.  A missing file reads as an empty history.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::AppPaths;

/// Default entry cap, matching [`HistoryConfig`](crate::config::HistoryConfig).
pub const DEFAULT_MAX_ENTRIES: usize = 50;

// ---------------------------------------------------------------------------
// ChatEntry
// ---------------------------------------------------------------------------

/// One saved translation: what was said, what was copied, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Unique id (millisecond timestamp at creation).
    pub id: String,
    /// The Korean source text.
    pub korean: String,
    /// The English translation the user chose.
    pub english: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// HistoryStore
// ---------------------------------------------------------------------------

/// JSON-file-backed history with append / load / clear operations.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    /// Store at an explicit path with an explicit cap (useful for tests).
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    /// Store at the platform-appropriate `history.json` with the default cap.
    pub fn open_default() -> Self {
        Self::new(AppPaths::new().history_file, DEFAULT_MAX_ENTRIES)
    }

    /// Load all entries, newest first.  A missing file yields an empty list.
    pub fn load(&self) -> Result<Vec<ChatEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let entries: Vec<ChatEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Prepend a new entry and persist, discarding entries beyond the cap.
    pub fn append(&self, korean: &str, english: &str) -> Result<()> {
        let mut entries = self.load()?;

        let now = unix_millis();
        entries.insert(
            0,
            ChatEntry {
                id: now.to_string(),
                korean: korean.to_string(),
                english: english.to_string(),
                timestamp: now,
            },
        );
        entries.truncate(self.max_entries);

        self.write(&entries)
    }

    /// Delete the whole history.  Succeeds when no file exists.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn write(&self, entries: &[ChatEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
