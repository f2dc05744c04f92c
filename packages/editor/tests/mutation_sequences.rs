//! Tests for longer mutation sequences
//!
//! This tests:
//! - Move + delete chains
//! - Undo/redo sequences
//! - History truncation and bounds
//! - Document integrity after operations

use blockforge_document::{Direction, Position};
use blockforge_editor::{EditorConfig, EditorDocument, EditorError, Mutation};

fn add(doc: &mut EditorDocument, kind: &str, parent: Option<&str>) -> String {
    doc.apply(Mutation::AddElement {
        kind: kind.to_string(),
        parent_id: parent.map(str::to_string),
        position: Position::End,
    })
    .unwrap()
    .created_id
    .unwrap()
}

fn snapshot(doc: &EditorDocument) -> String {
    doc.to_json().unwrap()
}

#[test]
fn test_move_then_delete_sequence() {
    let mut doc = EditorDocument::new(EditorConfig::default()).unwrap();
    let first = add(&mut doc, "container", None);
    let second = add(&mut doc, "container", None);
    let text = add(&mut doc, "text", Some(&second));

    doc.apply(Mutation::MoveNode {
        node_id: second.clone(),
        new_parent_id: first.clone(),
        position: Position::Index(0),
    })
    .unwrap();
    assert_eq!(doc.find(&first).unwrap().children[0].id, second);

    // Removing the outer container takes the moved subtree with it
    doc.apply(Mutation::RemoveNode { node_id: first.clone() })
        .unwrap();
    assert!(doc.find(&second).is_none());
    assert!(doc.find(&text).is_none());

    doc.undo().unwrap();
    assert!(doc.find(&text).is_some());
    assert_eq!(
        doc.document().root.find_parent_id(&second),
        Some(first.as_str())
    );
}

#[test]
fn test_undo_redo_are_inverse() {
    let mut doc = EditorDocument::new(EditorConfig::default()).unwrap();
    let mut states = vec![snapshot(&doc)];

    let heading = add(&mut doc, "heading", None);
    states.push(snapshot(&doc));
    add(&mut doc, "image", None);
    states.push(snapshot(&doc));
    doc.apply(Mutation::SetStyle {
        node_id: heading.clone(),
        property: "color".to_string(),
        value: Some("red".to_string()),
    })
    .unwrap();
    states.push(snapshot(&doc));

    for expected in states.iter().rev().skip(1) {
        assert!(doc.undo().unwrap());
        assert_eq!(&snapshot(&doc), expected);
    }
    assert!(!doc.undo().unwrap());

    for expected in states.iter().skip(1) {
        assert!(doc.redo().unwrap());
        assert_eq!(&snapshot(&doc), expected);
    }
    assert!(!doc.redo().unwrap());
}

#[test]
fn test_undo_restores_exact_overlay_opacity() {
    let mut doc = EditorDocument::new(EditorConfig::default()).unwrap();
    let background = add(&mut doc, "background", None);
    doc.apply(Mutation::SetOverlay {
        node_id: background.clone(),
        color: "#000000".to_string(),
        opacity: 0.10388530592455161,
    })
    .unwrap();
    let before = doc.document().clone();

    doc.apply(Mutation::SetOverlay {
        node_id: background,
        color: "#000000".to_string(),
        opacity: 0.5,
    })
    .unwrap();
    assert!(doc.undo().unwrap());

    assert_eq!(doc.document(), &before);
}

#[test]
fn test_new_edit_truncates_redo() {
    let mut doc = EditorDocument::new(EditorConfig::default()).unwrap();
    add(&mut doc, "heading", None);
    add(&mut doc, "text", None);

    doc.undo().unwrap();
    assert!(doc.can_redo());

    add(&mut doc, "button", None);
    assert!(!doc.can_redo());
    assert_eq!(doc.history().len(), 3);

    let kinds: Vec<_> = doc
        .document()
        .root
        .children
        .iter()
        .map(|c| c.kind_name())
        .collect();
    assert_eq!(kinds, vec!["heading", "button"]);
}

#[test]
fn test_history_is_bounded() {
    let config = EditorConfig {
        max_history_size: 5,
        ..EditorConfig::default()
    };
    let mut doc = EditorDocument::new(config).unwrap();
    for _ in 0..12 {
        add(&mut doc, "divider", None);
    }

    assert_eq!(doc.history().len(), 5);
    let mut undos = 0;
    while doc.undo().unwrap() {
        undos += 1;
    }
    assert_eq!(undos, 4);
    assert_eq!(doc.document().root.children.len(), 8);
}

#[test]
fn test_noops_do_not_grow_history() {
    let mut doc = EditorDocument::new(EditorConfig::default()).unwrap();
    let text = add(&mut doc, "text", None);
    let len = doc.history().len();

    doc.apply(Mutation::RemoveNode { node_id: "missing".to_string() })
        .unwrap();
    doc.apply(Mutation::ReorderSibling {
        node_id: text.clone(),
        direction: Direction::Up,
    })
    .unwrap();
    doc.apply(Mutation::ApplyGridColumns {
        node_id: text,
        columns: 3,
    })
    .unwrap();

    assert_eq!(doc.history().len(), len);
}

#[test]
fn test_rejected_move_leaves_document_intact() {
    let mut doc = EditorDocument::new(EditorConfig::default()).unwrap();
    let outer = add(&mut doc, "container", None);
    let inner = add(&mut doc, "container", Some(&outer));
    let before = snapshot(&doc);
    let len = doc.history().len();

    let err = doc
        .apply(Mutation::MoveNode {
            node_id: outer,
            new_parent_id: inner,
            position: Position::End,
        })
        .unwrap_err();

    assert!(matches!(err, EditorError::InvalidMove(_)));
    assert_eq!(snapshot(&doc), before);
    assert_eq!(doc.history().len(), len);
}

#[test]
fn test_resize_gesture_commits_once() {
    let mut doc = EditorDocument::new(EditorConfig::default()).unwrap();
    let image = add(&mut doc, "image", None);
    let len = doc.history().len();

    for width in [110, 120, 130] {
        doc.apply_transient(Mutation::Resize {
            node_id: image.clone(),
            width,
            height: 80,
            handle: blockforge_editor::ResizeHandle::Se,
        })
        .unwrap();
    }
    assert!(doc.commit().unwrap());
    assert_eq!(doc.history().len(), len + 1);
    assert_eq!(doc.find(&image).unwrap().styles["width"], "130px");

    doc.undo().unwrap();
    assert_ne!(
        doc.find(&image).unwrap().styles.get("width").map(String::as_str),
        Some("130px")
    );
}

#[test]
fn test_duplicate_chain_keeps_ids_unique() {
    let mut doc = EditorDocument::new(EditorConfig::default()).unwrap();
    let list = add(&mut doc, "repeater", None);

    let mut target = list;
    for _ in 0..4 {
        target = doc
            .apply(Mutation::Duplicate { node_id: target })
            .unwrap()
            .created_id
            .unwrap();
    }

    assert_eq!(doc.document().root.children.len(), 5);
    assert!(doc.document().duplicate_ids().is_empty());
}
