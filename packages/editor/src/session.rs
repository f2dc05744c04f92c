//! # Edit Session
//!
//! One author's view of a document: the current selection and a clipboard
//! on top of an [`EditorDocument`].

use crate::{EditorDocument, EditorError, Mutation, MutationResult};
use blockforge_document::{Node, Position, Visitor};
use serde::Serialize;
use tracing::debug;

/// One row of the layer panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRow {
    pub id: String,
    pub kind: String,
    pub content: String,
    pub depth: usize,
    pub visible: bool,
    pub locked: bool,
    pub has_children: bool,
}

/// Selection and clipboard state for one editor
#[derive(Debug)]
pub struct EditSession {
    pub document: EditorDocument,

    selected: Option<String>,

    /// Deep copy of the last copied node
    clipboard: Option<Node>,
}

impl EditSession {
    pub fn new(document: EditorDocument) -> Self {
        Self {
            document,
            selected: None,
            clipboard: None,
        }
    }

    /// Select a node; unknown ids clear the selection
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.document.find(id).is_some())
            .map(str::to_string);
    }

    pub fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_deref().and_then(|id| self.document.find(id))
    }

    /// Apply a mutation; created nodes become the selection
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.document.apply(mutation)?;
        if let Some(id) = &result.created_id {
            self.selected = Some(id.clone());
        }
        self.drop_stale_selection();
        Ok(result)
    }

    /// Remove `id`, or the selection when `None`
    pub fn delete(&mut self, id: Option<&str>) -> Result<bool, EditorError> {
        let Some(target) = id.or(self.selection()).map(str::to_string) else {
            return Ok(false);
        };
        let result = self.apply(Mutation::RemoveNode { node_id: target })?;
        Ok(result.changed)
    }

    /// Copy `id`, or the selection, into the clipboard
    pub fn copy(&mut self, id: Option<&str>) -> bool {
        let node = id
            .or(self.selection())
            .and_then(|id| self.document.find(id))
            .cloned();
        match node {
            Some(node) => {
                debug!(node_id = %node.id, "Copied node");
                self.clipboard = Some(node);
                true
            }
            None => false,
        }
    }

    pub fn clipboard(&self) -> Option<&Node> {
        self.clipboard.as_ref()
    }

    /// Paste a fresh-id copy of the clipboard
    ///
    /// The target is `parent`, else the selection, else the root. A selected
    /// leaf pastes next to itself, into its own parent.
    pub fn paste(&mut self, parent: Option<&str>) -> Result<Option<String>, EditorError> {
        let Some(clip) = &self.clipboard else {
            return Ok(None);
        };
        let node = clip.clone_with_fresh_ids(self.document.ids_mut());

        let parent_id = match parent {
            Some(parent) => parent.to_string(),
            None => self.paste_target(),
        };
        let result = self.apply(Mutation::InsertNode {
            parent_id,
            position: Position::End,
            node,
        })?;
        Ok(result.created_id)
    }

    fn paste_target(&self) -> String {
        let root = self.document.root_id();
        let Some(selected) = self.selected_node() else {
            return root.to_string();
        };
        if selected.is_container() {
            return selected.id.clone();
        }
        self.document
            .document()
            .root
            .find_parent_id(&selected.id)
            .unwrap_or(root)
            .to_string()
    }

    /// Duplicate `id`, or the selection; the copy becomes the selection
    pub fn duplicate(&mut self, id: Option<&str>) -> Result<Option<String>, EditorError> {
        let Some(target) = id.or(self.selection()).map(str::to_string) else {
            return Ok(None);
        };
        let result = self.apply(Mutation::Duplicate { node_id: target })?;
        Ok(result.created_id)
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let undone = self.document.undo()?;
        self.drop_stale_selection();
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let redone = self.document.redo()?;
        self.drop_stale_selection();
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    /// The tree flattened pre-order through `children`, root first
    pub fn layers(&self) -> Vec<LayerRow> {
        layers(&self.document.document().root)
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.document.find(id).is_none() {
                self.selected = None;
            }
        }
    }
}

/// Flatten `root` into layer-panel rows
pub fn layers(root: &Node) -> Vec<LayerRow> {
    let mut collector = LayerCollector {
        depth: 0,
        rows: Vec::new(),
    };
    collector.visit_node(root);
    collector.rows
}

struct LayerCollector {
    depth: usize,
    rows: Vec<LayerRow>,
}

impl Visitor for LayerCollector {
    fn visit_node(&mut self, node: &Node) {
        self.rows.push(LayerRow {
            id: node.id.clone(),
            kind: node.kind_name().to_string(),
            content: node.content().unwrap_or_default().to_string(),
            depth: self.depth,
            visible: node.visible,
            locked: node.locked,
            has_children: !node.children.is_empty(),
        });

        // repeater items are edited through their repeater, not listed
        self.depth += 1;
        for child in &node.children {
            self.visit_node(child);
        }
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorConfig;

    fn session() -> EditSession {
        EditSession::new(EditorDocument::new(EditorConfig::default()).unwrap())
    }

    fn add(session: &mut EditSession, kind: &str, parent: Option<&str>) -> String {
        session
            .apply(Mutation::AddElement {
                kind: kind.to_string(),
                parent_id: parent.map(str::to_string),
                position: Position::End,
            })
            .unwrap()
            .created_id
            .unwrap()
    }

    #[test]
    fn test_added_element_is_selected() {
        let mut session = session();
        let id = add(&mut session, "heading", None);
        assert_eq!(session.selection(), Some(id.as_str()));
    }

    #[test]
    fn test_select_unknown_clears() {
        let mut session = session();
        add(&mut session, "heading", None);
        session.select(Some("nope"));
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = session();
        add(&mut session, "text", None);
        assert!(session.delete(None).unwrap());
        assert_eq!(session.selection(), None);
        assert!(!session.delete(None).unwrap());
    }

    #[test]
    fn test_copy_paste_uses_fresh_ids() {
        let mut session = session();
        let container = add(&mut session, "container", None);
        let text = add(&mut session, "text", Some(&container));

        assert!(session.copy(Some(&container)));
        let first = session.paste(None).unwrap().unwrap();
        let second = session.paste(None).unwrap().unwrap();

        assert_ne!(first, container);
        assert_ne!(first, second);
        assert!(session.document.document().duplicate_ids().is_empty());
        assert!(session.document.find(&text).is_some());
    }

    #[test]
    fn test_paste_next_to_selected_leaf() {
        let mut session = session();
        let container = add(&mut session, "container", None);
        let text = add(&mut session, "text", Some(&container));

        session.copy(Some(&text));
        session.select(Some(&text));
        let pasted = session.paste(None).unwrap().unwrap();

        let parent = session.document.document().root.find_parent_id(&pasted);
        assert_eq!(parent, Some(container.as_str()));
    }

    #[test]
    fn test_paste_with_empty_clipboard() {
        let mut session = session();
        assert_eq!(session.paste(None).unwrap(), None);
    }

    #[test]
    fn test_duplicate_appends_to_parent() {
        let mut session = session();
        let a = add(&mut session, "text", None);
        add(&mut session, "image", None);

        let copy = session.duplicate(Some(&a)).unwrap().unwrap();
        let root = &session.document.document().root;
        assert_eq!(root.children.last().map(|c| c.id.as_str()), Some(copy.as_str()));
        assert_eq!(session.selection(), Some(copy.as_str()));
    }

    #[test]
    fn test_undo_drops_stale_selection() {
        let mut session = session();
        add(&mut session, "text", None);
        assert!(session.undo().unwrap());
        assert_eq!(session.selection(), None);
        assert!(session.can_redo());
    }

    #[test]
    fn test_layers() {
        let mut session = session();
        let row = add(&mut session, "row", None);
        add(&mut session, "heading", Some(&row));

        let layers = session.layers();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].depth, 0);
        assert!(layers[0].has_children);
        assert_eq!(layers[2].kind, "heading");
        assert_eq!(layers[2].depth, 2);
        assert_eq!(layers[2].content, "New heading");
    }
}
