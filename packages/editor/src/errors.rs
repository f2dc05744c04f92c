//! Error types for the editor

use crate::history::HistoryError;
use blockforge_document::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid move: {0}")]
    InvalidMove(TreeError),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Node {0} is locked")]
    Locked(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
