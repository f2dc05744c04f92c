use crate::history::DEFAULT_MAX_HISTORY_SIZE;
use serde::{Deserialize, Serialize};

/// Editor behaviour knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Retained undo snapshots, including the current one
    pub max_history_size: usize,

    /// Reject mutations that target a locked node
    pub enforce_locks: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            enforce_locks: false,
        }
    }
}
