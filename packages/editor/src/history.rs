//! # Undo/Redo History
//!
//! Linear history of whole-document snapshots.
//!
//! ## Design
//!
//! - Each snapshot is the document's JSON encoding, so later edits to the
//!   live document can never reach a stored state
//! - `index` addresses the snapshot matching the live document
//! - Pushing after an undo discards everything past `index`
//! - Past `max_size` snapshots the oldest one is evicted
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(50);
//! history.push(&doc)?;            // initial state
//! mutate(&mut doc);
//! history.push(&doc)?;
//!
//! if let Some(previous) = history.undo()? {
//!     doc = previous;
//! }
//! ```

use blockforge_document::Document;
use thiserror::Error;

pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Snapshot {index} is unreadable: {source}")]
    Decode {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Bounded snapshot history for one document
#[derive(Debug, Clone)]
pub struct History {
    /// Encoded snapshots, oldest first
    snapshots: Vec<String>,

    /// Snapshot matching the live document
    index: usize,

    /// Maximum number of retained snapshots (at least 1)
    max_size: usize,
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: 0,
            max_size: max_size.max(1),
        }
    }

    /// Record `doc` as the newest state, dropping any redo branch
    pub fn push(&mut self, doc: &Document) -> Result<(), HistoryError> {
        let snapshot = serde_json::to_string(doc).map_err(HistoryError::Encode)?;
        self.push_snapshot(snapshot);
        Ok(())
    }

    /// Like [`History::push`], but skips the push when `doc` equals the current snapshot
    pub fn push_if_changed(&mut self, doc: &Document) -> Result<bool, HistoryError> {
        let snapshot = serde_json::to_string(doc).map_err(HistoryError::Encode)?;
        if self.current_snapshot() == Some(snapshot.as_str()) {
            return Ok(false);
        }
        self.push_snapshot(snapshot);
        Ok(true)
    }

    fn push_snapshot(&mut self, snapshot: String) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.index + 1);
        }
        self.snapshots.push(snapshot);
        self.index = self.snapshots.len() - 1;

        if self.snapshots.len() > self.max_size {
            self.snapshots.remove(0);
            self.index -= 1;
        }
    }

    /// Forget everything and start over from `doc`
    pub fn reset(&mut self, doc: &Document) -> Result<(), HistoryError> {
        self.snapshots.clear();
        self.index = 0;
        self.push(doc)
    }

    /// Step back; returns the state to make live, or `None` at the oldest snapshot
    pub fn undo(&mut self) -> Result<Option<Document>, HistoryError> {
        if !self.can_undo() {
            return Ok(None);
        }
        self.index -= 1;
        self.decode(self.index).map(Some)
    }

    /// Step forward; returns the state to make live, or `None` at the newest snapshot
    pub fn redo(&mut self) -> Result<Option<Document>, HistoryError> {
        if !self.can_redo() {
            return Ok(None);
        }
        self.index += 1;
        self.decode(self.index).map(Some)
    }

    /// Decoded copy of the current snapshot
    pub fn current(&self) -> Result<Option<Document>, HistoryError> {
        if self.snapshots.is_empty() {
            return Ok(None);
        }
        self.decode(self.index).map(Some)
    }

    pub fn current_snapshot(&self) -> Option<&str> {
        self.snapshots.get(self.index).map(String::as_str)
    }

    fn decode(&self, index: usize) -> Result<Document, HistoryError> {
        let snapshot = self.snapshots.get(index).map(String::as_str).unwrap_or_default();
        serde_json::from_str(snapshot).map_err(|source| HistoryError::Decode { index, source })
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of undo steps available
    pub fn undo_levels(&self) -> usize {
        self.index
    }

    /// Number of redo steps available
    pub fn redo_levels(&self) -> usize {
        self.snapshots.len().saturating_sub(self.index + 1)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_SIZE)
    }
}
