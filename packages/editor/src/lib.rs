//! # Blockforge Editor
//!
//! Editing engine for block documents: validated mutations, snapshot
//! history and a per-author session on top of `blockforge-document`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: Node tree, factory, tree ops      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save documents                      │
//! │  - Apply mutations with validation          │
//! │  - Snapshot undo/redo                       │
//! │  - Selection, clipboard, layers             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html / compiler-css: export        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree is the source of truth**: HTML and CSS are derived views
//! 2. **One snapshot per committed edit**: undo restores whole documents
//! 3. **Stale references are no-ops**: edits naming vanished nodes change nothing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockforge_editor::{EditorConfig, EditorDocument, Mutation};
//!
//! let mut doc = EditorDocument::load("page.json", EditorConfig::default())?;
//!
//! let result = doc.apply(Mutation::AddElement {
//!     kind: "heading".to_string(),
//!     parent_id: None,
//!     position: Position::End,
//! })?;
//!
//! doc.undo()?;
//! doc.save("page.json")?;
//! ```

mod config;
mod document;
mod errors;
mod history;
mod import;
mod mutations;
mod session;

pub use config::EditorConfig;
pub use document::EditorDocument;
pub use errors::EditorError;
pub use history::{History, HistoryError, DEFAULT_MAX_HISTORY_SIZE};
pub use import::{Fragment, HtmlImporter, RawHtmlImporter};
pub use mutations::{Mutation, MutationResult, ResizeHandle};
pub use session::{layers, EditSession, LayerRow};

pub use blockforge_document;
