//! # Editor Document
//!
//! A block document plus everything needed to edit it: id generation,
//! snapshot history and the editor configuration.
//!
//! ## Lifecycle
//!
//! ```text
//! new / load → apply* → (undo | redo)* → to_json / export
//!                ↓
//!        one snapshot per change
//! ```
//!
//! ## Failure policy
//!
//! - Unknown ids and wrong-kind targets are silent no-ops (`changed == false`)
//! - Moves into the node's own subtree, or of the root, fail with
//!   [`EditorError::InvalidMove`] and leave the document unchanged
//! - Locked targets fail with [`EditorError::Locked`] only when lock
//!   enforcement is configured

use crate::config::EditorConfig;
use crate::history::History;
use crate::import::HtmlImporter;
use crate::{EditorError, Mutation, MutationResult};
use blockforge_document::{create_raw_html, Document, IdGenerator, Node, TreeError};
use std::path::Path;
use tracing::{debug, info, warn};

/// Editable block document with undo/redo
#[derive(Debug)]
pub struct EditorDocument {
    document: Document,
    history: History,
    ids: IdGenerator,
    config: EditorConfig,

    /// Increments on every applied change
    pub version: u64,

    /// Transient edits applied since the last snapshot
    uncommitted: bool,
}

impl EditorDocument {
    /// Fresh document with an empty root
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        let mut ids = IdGenerator::new();
        let document = Document::new(&mut ids);
        Self::with_ids(document, ids, config)
    }

    /// Adopt an existing document; its ids are reserved and duplicates re-issued
    pub fn from_document(mut document: Document, config: EditorConfig) -> Result<Self, EditorError> {
        let mut ids = IdGenerator::new();
        let reissued = document.reissue_duplicate_ids(&mut ids);
        if reissued > 0 {
            warn!(count = reissued, "Re-issued duplicate node ids");
        }
        Self::with_ids(document, ids, config)
    }

    fn with_ids(document: Document, ids: IdGenerator, config: EditorConfig) -> Result<Self, EditorError> {
        let mut history = History::new(config.max_history_size);
        history.push(&document)?;

        Ok(Self {
            document,
            history,
            ids,
            config,
            version: 0,
            uncommitted: false,
        })
    }

    pub fn from_json(json: &str, config: EditorConfig) -> Result<Self, EditorError> {
        let document = Document::from_json(json)?;
        Self::from_document(document, config)
    }

    /// Load a saved document from disk
    pub fn load(path: impl AsRef<Path>, config: EditorConfig) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let doc = Self::from_json(&json, config)?;
        info!(path = %path.display(), nodes = doc.document.all_ids().len(), "Loaded document");
        Ok(doc)
    }

    /// Write the document as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(self.document.to_json()?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(self.document.to_json_pretty()?)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn root_id(&self) -> &str {
        &self.document.root.id
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.document.find(id)
    }

    /// Apply a mutation and record one snapshot if the document changed
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.apply_inner(&mutation)?;
        if result.changed || self.uncommitted {
            self.record()?;
        }
        Ok(result)
    }

    /// Apply several mutations in order, one snapshot each
    pub fn apply_all<I>(&mut self, mutations: I) -> Result<Vec<MutationResult>, EditorError>
    where
        I: IntoIterator<Item = Mutation>,
    {
        mutations.into_iter().map(|m| self.apply(m)).collect()
    }

    /// Apply without recording a snapshot (continuous gestures such as drag-resize)
    ///
    /// Call [`EditorDocument::commit`] when the gesture ends.
    pub fn apply_transient(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.apply_inner(&mutation)?;
        if result.changed {
            self.version += 1;
            self.uncommitted = true;
        }
        Ok(result)
    }

    /// Snapshot pending transient edits; returns whether a snapshot was taken
    pub fn commit(&mut self) -> Result<bool, EditorError> {
        if !self.uncommitted {
            return Ok(false);
        }
        self.uncommitted = false;
        Ok(self.history.push_if_changed(&self.document)?)
    }

    pub fn has_uncommitted_changes(&self) -> bool {
        self.uncommitted
    }

    fn apply_inner(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        if self.config.enforce_locks {
            for id in mutation.lock_targets() {
                if self.document.find(id).is_some_and(|node| node.locked) {
                    warn!(node_id = id, op = mutation.name(), "Rejected mutation on locked node");
                    return Err(EditorError::Locked(id.to_string()));
                }
            }
        }

        match mutation.apply(&mut self.document, &mut self.ids) {
            Ok(result) => {
                debug!(op = mutation.name(), changed = result.changed, "Applied mutation");
                Ok(result)
            }
            Err(err) if mutation.is_move() && is_invalid_move(&err) => {
                warn!(op = mutation.name(), error = %err, "Rejected move");
                Err(EditorError::InvalidMove(err))
            }
            Err(err) if err.is_reference_error() || err == TreeError::RootImmutable => {
                debug!(op = mutation.name(), error = %err, "Mutation ignored");
                Ok(MutationResult::unchanged())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn record(&mut self) -> Result<(), EditorError> {
        self.version += 1;
        self.uncommitted = false;
        self.history.push(&self.document)?;
        Ok(())
    }

    /// Step back one snapshot; pending transient edits are discarded first
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        if self.uncommitted {
            self.uncommitted = false;
            if let Some(current) = self.history.current()? {
                self.restore(current);
                return Ok(true);
            }
        }
        match self.history.undo()? {
            Some(previous) => {
                self.restore(previous);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        if self.uncommitted {
            return Ok(false);
        }
        match self.history.redo()? {
            Some(next) => {
                self.restore(next);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.uncommitted || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.uncommitted && self.history.can_redo()
    }

    fn restore(&mut self, document: Document) {
        self.ids.reserve(document.all_ids());
        self.document = document;
        self.version += 1;
    }

    /// Replace the root's children with imported markup
    ///
    /// Variables are appended and css classes merged. When the importer fails or
    /// yields nothing, one `raw-html` node holding `source` is appended instead.
    /// Blank sources are ignored. Returns whether the document changed.
    pub fn import_html<I: HtmlImporter>(&mut self, source: &str, importer: &I) -> Result<bool, EditorError> {
        if source.trim().is_empty() {
            debug!("Ignored blank import");
            return Ok(false);
        }

        match importer.import(source) {
            Ok(fragment) if !fragment.children.is_empty() => {
                let elements = fragment.children.len();
                let variables = fragment.variables.len();
                self.document.root.children = fragment.children;
                self.document.variables.extend(fragment.variables);
                self.document.merge_css_classes(fragment.css_classes);
                let reissued = self.document.reissue_duplicate_ids(&mut self.ids);
                info!(elements, variables, reissued, "HTML imported");
            }
            Ok(_) => {
                warn!("HTML import produced no elements, keeping source as raw html");
                self.append_raw_html(source);
            }
            Err(err) => {
                warn!(error = %err, "HTML import failed, keeping source as raw html");
                self.append_raw_html(source);
            }
        }

        self.record()?;
        Ok(true)
    }

    fn append_raw_html(&mut self, source: &str) {
        let node = create_raw_html(source, &mut self.ids);
        self.document.root.children.push(node);
    }
}

fn is_invalid_move(err: &TreeError) -> bool {
    matches!(err, TreeError::CycleDetected { .. } | TreeError::RootImmutable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{Fragment, RawHtmlImporter};
    use blockforge_document::{Direction, Position};

    fn editor() -> EditorDocument {
        EditorDocument::new(EditorConfig::default()).unwrap()
    }

    fn add(editor: &mut EditorDocument, kind: &str) -> String {
        editor
            .apply(Mutation::AddElement {
                kind: kind.to_string(),
                parent_id: None,
                position: Position::End,
            })
            .unwrap()
            .created_id
            .unwrap()
    }

    #[test]
    fn test_new_document_has_one_snapshot() {
        let doc = editor();
        assert_eq!(doc.history().len(), 1);
        assert!(!doc.can_undo());
        assert!(!doc.can_redo());
    }

    #[test]
    fn test_unknown_ids_are_silent_noops() {
        let mut doc = editor();
        let result = doc
            .apply(Mutation::ToggleVisibility {
                node_id: "missing".to_string(),
            })
            .unwrap();

        assert!(!result.changed);
        assert_eq!(doc.history().len(), 1);
        assert_eq!(doc.version, 0);
    }

    #[test]
    fn test_remove_root_is_ignored() {
        let mut doc = editor();
        let root = doc.root_id().to_string();
        let result = doc.apply(Mutation::RemoveNode { node_id: root }).unwrap();
        assert!(!result.changed);
    }

    #[test]
    fn test_cycle_is_invalid_move() {
        let mut doc = editor();
        let outer = add(&mut doc, "container");
        let inner = doc
            .apply(Mutation::AddElement {
                kind: "container".into(),
                parent_id: Some(outer.clone()),
                position: Position::End,
            })
            .unwrap()
            .created_id
            .unwrap();
        let before = doc.to_json().unwrap();

        let err = doc
            .apply(Mutation::MoveNode {
                node_id: outer,
                new_parent_id: inner,
                position: Position::End,
            })
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidMove(TreeError::CycleDetected { .. })));
        assert_eq!(doc.to_json().unwrap(), before);
    }

    #[test]
    fn test_move_root_is_invalid_move() {
        let mut doc = editor();
        let target = add(&mut doc, "container");
        let root = doc.root_id().to_string();
        let err = doc
            .apply(Mutation::MoveNode {
                node_id: root,
                new_parent_id: target,
                position: Position::End,
            })
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidMove(TreeError::RootImmutable)));
    }

    #[test]
    fn test_no_snapshot_when_unchanged() {
        let mut doc = editor();
        let only = add(&mut doc, "text");
        let len = doc.history().len();

        doc.apply(Mutation::ReorderSibling {
            node_id: only,
            direction: Direction::Up,
        })
        .unwrap();
        assert_eq!(doc.history().len(), len);
    }

    #[test]
    fn test_transient_edits_commit_once() {
        let mut doc = editor();
        let img = add(&mut doc, "image");
        let len = doc.history().len();

        for width in [100, 120, 140] {
            doc.apply_transient(Mutation::Resize {
                node_id: img.clone(),
                width,
                height: 50,
                handle: crate::ResizeHandle::E,
            })
            .unwrap();
        }
        assert_eq!(doc.history().len(), len);
        assert!(doc.commit().unwrap());
        assert!(!doc.commit().unwrap());
        assert_eq!(doc.history().len(), len + 1);
        assert_eq!(doc.find(&img).unwrap().styles["width"], "140px");
    }

    #[test]
    fn test_undo_discards_uncommitted_edits_first() {
        let mut doc = editor();
        let img = add(&mut doc, "image");

        doc.apply_transient(Mutation::Resize {
            node_id: img.clone(),
            width: 90,
            height: 90,
            handle: crate::ResizeHandle::Se,
        })
        .unwrap();
        assert!(doc.can_undo());

        assert!(doc.undo().unwrap());
        assert!(doc.find(&img).is_some());
        assert_eq!(doc.find(&img).unwrap().styles["height"], "auto");

        assert!(doc.undo().unwrap());
        assert!(doc.find(&img).is_none());
    }

    #[test]
    fn test_locks_enforced_when_configured() {
        let config = EditorConfig {
            enforce_locks: true,
            ..EditorConfig::default()
        };
        let mut doc = EditorDocument::new(config).unwrap();
        let text = add(&mut doc, "text");
        doc.apply(Mutation::ToggleLock { node_id: text.clone() }).unwrap();

        let err = doc
            .apply(Mutation::RemoveNode { node_id: text.clone() })
            .unwrap_err();
        assert!(matches!(err, EditorError::Locked(id) if id == text));

        doc.apply(Mutation::ToggleLock { node_id: text.clone() }).unwrap();
        assert!(doc.apply(Mutation::RemoveNode { node_id: text }).unwrap().changed);
    }

    #[test]
    fn test_locks_are_hints_by_default() {
        let mut doc = editor();
        let text = add(&mut doc, "text");
        doc.apply(Mutation::ToggleLock { node_id: text.clone() }).unwrap();
        assert!(doc.apply(Mutation::RemoveNode { node_id: text }).unwrap().changed);
    }

    #[test]
    fn test_import_replaces_children() {
        let mut doc = editor();
        add(&mut doc, "text");

        let importer = |_: &str| -> Result<Fragment, String> {
            let mut ids = IdGenerator::from_seed("imp");
            Ok(Fragment {
                children: vec![
                    blockforge_document::create_element("heading", &mut ids),
                    blockforge_document::create_element("heading", &mut IdGenerator::from_seed("imp")),
                ],
                variables: Vec::new(),
                css_classes: ["pd-intro".to_string()].into_iter().collect(),
            })
        };

        assert!(doc.import_html("<h2>Hi</h2>", &importer).unwrap());
        assert_eq!(doc.document().root.children.len(), 2);
        assert!(doc.document().duplicate_ids().is_empty());
        assert!(doc.document().css_classes.contains("pd-intro"));
        assert!(doc.can_undo());
    }

    #[test]
    fn test_import_fallback_to_raw_html() {
        let mut doc = editor();
        let failing = |_: &str| -> Result<Fragment, String> { Err("bad markup".to_string()) };

        assert!(doc.import_html("<div>", &failing).unwrap());
        assert!(doc.import_html("<p>", &RawHtmlImporter).unwrap());
        assert!(!doc.import_html("   ", &RawHtmlImporter).unwrap());

        let children = &doc.document().root.children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind_name(), "raw-html");
        assert_eq!(children[0].content(), Some("<div>"));
    }

    #[test]
    fn test_load_reserves_existing_ids() {
        let mut original = editor();
        add(&mut original, "text");
        let json = original.to_json().unwrap();

        let mut doc = EditorDocument::from_json(&json, EditorConfig::default()).unwrap();
        add(&mut doc, "text");
        assert!(doc.document().duplicate_ids().is_empty());
    }
}
