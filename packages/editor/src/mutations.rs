//! # Document Mutations
//!
//! Every edit the canvas can make, as one serializable operation.
//!
//! ## Semantics
//!
//! ### Structure
//! - Inserts land at a [`Position`]; negative indices append, large ones clamp
//! - Moves detach first, then insert; moving into the node's own subtree fails
//! - Duplicates and inserted nodes whose ids collide get fresh ids throughout
//!
//! ### Properties
//! - Setting a value equal to the current one reports "unchanged"
//! - Unknown preset names are no-ops
//! - Kind-specific operations fail with `WrongKind` on other kinds
//!
//! Applying never pushes history; that is the document's job.

use blockforge_document::presets::{self, StylePreset};
use blockforge_document::{
    create_element, create_repeater_item, is_valid_name, Direction, Document, IdGenerator, ItemLayout, Node,
    NodeKind, Position, TreeError, TreeResult,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Resize handle dragged on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Right edge: width only
    E,
    /// Bottom edge: height only
    S,
    /// Corner: both
    Se,
}

/// Semantic edit operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Create a default element of `kind` (root when no parent is given)
    AddElement {
        kind: String,
        #[serde(default)]
        parent_id: Option<String>,
        #[serde(default)]
        position: Position,
    },

    /// Insert a prebuilt node
    InsertNode {
        parent_id: String,
        #[serde(default)]
        position: Position,
        node: Node,
    },

    RemoveNode {
        node_id: String,
    },

    MoveNode {
        node_id: String,
        new_parent_id: String,
        #[serde(default)]
        position: Position,
    },

    ReorderSibling {
        node_id: String,
        direction: Direction,
    },

    ReorderToPosition {
        node_id: String,
        index: usize,
    },

    BringToFront {
        node_id: String,
    },

    SendToBack {
        node_id: String,
    },

    /// Fresh-id copy appended to the original's parent
    Duplicate {
        node_id: String,
    },

    /// `None` or a blank value removes the property
    SetStyle {
        node_id: String,
        property: String,
        #[serde(default)]
        value: Option<String>,
    },

    SetAttribute {
        node_id: String,
        name: String,
        value: String,
    },

    SetDataAttribute {
        node_id: String,
        name: String,
        #[serde(default)]
        value: Option<String>,
    },

    ToggleVisibility {
        node_id: String,
    },

    ToggleLock {
        node_id: String,
    },

    AddClass {
        node_id: String,
        class: String,
    },

    RemoveClass {
        node_id: String,
        class: String,
    },

    ToggleClass {
        node_id: String,
        class: String,
    },

    /// Space-separated list replacing all classes
    SetClasses {
        node_id: String,
        classes: String,
    },

    ApplyGridColumns {
        node_id: String,
        columns: u32,
    },

    SetBackgroundImage {
        node_id: String,
        url: String,
    },

    SetOverlay {
        node_id: String,
        color: String,
        opacity: f64,
    },

    AddRepeaterItem {
        node_id: String,
    },

    RemoveRepeaterItem {
        node_id: String,
        index: usize,
    },

    SetRepeaterLayout {
        node_id: String,
        layout: ItemLayout,
        #[serde(default = "default_items_per_row")]
        items_per_row: u32,
    },

    ApplyButtonVariant {
        node_id: String,
        variant: String,
    },

    ApplyButtonSize {
        node_id: String,
        size: String,
    },

    ApplyIconSize {
        node_id: String,
        size: String,
    },

    /// Live drag-resize; usually applied transiently and committed on release
    Resize {
        node_id: String,
        width: u32,
        height: u32,
        handle: ResizeHandle,
    },
}

fn default_items_per_row() -> u32 {
    1
}

/// Outcome of applying one mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationResult {
    /// Whether the document differs from before
    pub changed: bool,

    /// Node created by the mutation, if any
    pub created_id: Option<String>,
}

impl MutationResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    fn changed(changed: bool) -> Self {
        Self {
            changed,
            created_id: None,
        }
    }

    fn created(id: String) -> Self {
        Self {
            changed: true,
            created_id: Some(id),
        }
    }
}

impl Mutation {
    /// Operation name, as written in the `op` field
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "addElement",
            Mutation::InsertNode { .. } => "insertNode",
            Mutation::RemoveNode { .. } => "removeNode",
            Mutation::MoveNode { .. } => "moveNode",
            Mutation::ReorderSibling { .. } => "reorderSibling",
            Mutation::ReorderToPosition { .. } => "reorderToPosition",
            Mutation::BringToFront { .. } => "bringToFront",
            Mutation::SendToBack { .. } => "sendToBack",
            Mutation::Duplicate { .. } => "duplicate",
            Mutation::SetStyle { .. } => "setStyle",
            Mutation::SetAttribute { .. } => "setAttribute",
            Mutation::SetDataAttribute { .. } => "setDataAttribute",
            Mutation::ToggleVisibility { .. } => "toggleVisibility",
            Mutation::ToggleLock { .. } => "toggleLock",
            Mutation::AddClass { .. } => "addClass",
            Mutation::RemoveClass { .. } => "removeClass",
            Mutation::ToggleClass { .. } => "toggleClass",
            Mutation::SetClasses { .. } => "setClasses",
            Mutation::ApplyGridColumns { .. } => "applyGridColumns",
            Mutation::SetBackgroundImage { .. } => "setBackgroundImage",
            Mutation::SetOverlay { .. } => "setOverlay",
            Mutation::AddRepeaterItem { .. } => "addRepeaterItem",
            Mutation::RemoveRepeaterItem { .. } => "removeRepeaterItem",
            Mutation::SetRepeaterLayout { .. } => "setRepeaterLayout",
            Mutation::ApplyButtonVariant { .. } => "applyButtonVariant",
            Mutation::ApplyButtonSize { .. } => "applyButtonSize",
            Mutation::ApplyIconSize { .. } => "applyIconSize",
            Mutation::Resize { .. } => "resize",
        }
    }

    /// Node ids whose `locked` flag guards this mutation
    ///
    /// Inserts are guarded by their parent, moves by both ends. Toggling the
    /// lock itself is never guarded.
    pub fn lock_targets(&self) -> Vec<&str> {
        match self {
            Mutation::ToggleLock { .. } => Vec::new(),
            Mutation::AddElement { parent_id, .. } => parent_id.iter().map(String::as_str).collect(),
            Mutation::InsertNode { parent_id, .. } => vec![parent_id.as_str()],
            Mutation::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => vec![node_id.as_str(), new_parent_id.as_str()],
            Mutation::RemoveNode { node_id }
            | Mutation::ReorderSibling { node_id, .. }
            | Mutation::ReorderToPosition { node_id, .. }
            | Mutation::BringToFront { node_id }
            | Mutation::SendToBack { node_id }
            | Mutation::Duplicate { node_id }
            | Mutation::SetStyle { node_id, .. }
            | Mutation::SetAttribute { node_id, .. }
            | Mutation::SetDataAttribute { node_id, .. }
            | Mutation::ToggleVisibility { node_id }
            | Mutation::AddClass { node_id, .. }
            | Mutation::RemoveClass { node_id, .. }
            | Mutation::ToggleClass { node_id, .. }
            | Mutation::SetClasses { node_id, .. }
            | Mutation::ApplyGridColumns { node_id, .. }
            | Mutation::SetBackgroundImage { node_id, .. }
            | Mutation::SetOverlay { node_id, .. }
            | Mutation::AddRepeaterItem { node_id }
            | Mutation::RemoveRepeaterItem { node_id, .. }
            | Mutation::SetRepeaterLayout { node_id, .. }
            | Mutation::ApplyButtonVariant { node_id, .. }
            | Mutation::ApplyButtonSize { node_id, .. }
            | Mutation::ApplyIconSize { node_id, .. }
            | Mutation::Resize { node_id, .. } => vec![node_id.as_str()],
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Mutation::MoveNode { .. })
    }

    /// Apply to `doc`, drawing any new ids from `ids`
    pub fn apply(&self, doc: &mut Document, ids: &mut IdGenerator) -> TreeResult<MutationResult> {
        match self {
            Mutation::AddElement {
                kind,
                parent_id,
                position,
            } => {
                let parent_id = parent_id.clone().unwrap_or_else(|| doc.root.id.clone());
                let node = create_element(kind, ids);
                let id = node.id.clone();
                doc.root.insert_at(&parent_id, node, *position)?;
                Ok(MutationResult::created(id))
            }

            Mutation::InsertNode {
                parent_id,
                position,
                node,
            } => Self::apply_insert(doc, ids, parent_id, *position, node),

            Mutation::RemoveNode { node_id } => {
                doc.root.remove_descendant(node_id)?;
                Ok(MutationResult::changed(true))
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                position,
            } => {
                let before = doc.root.path_to(node_id);
                doc.root.move_node(node_id, new_parent_id, *position)?;
                Ok(MutationResult::changed(doc.root.path_to(node_id) != before))
            }

            Mutation::ReorderSibling { node_id, direction } => doc
                .root
                .reorder_sibling(node_id, *direction)
                .map(MutationResult::changed),

            Mutation::ReorderToPosition { node_id, index } => doc
                .root
                .reorder_to_position(node_id, *index)
                .map(MutationResult::changed),

            Mutation::BringToFront { node_id } => {
                doc.root.bring_to_front(node_id).map(MutationResult::changed)
            }

            Mutation::SendToBack { node_id } => {
                doc.root.send_to_back(node_id).map(MutationResult::changed)
            }

            Mutation::Duplicate { node_id } => {
                if doc.root.find(node_id).is_none() {
                    return Err(TreeError::NotFound(node_id.clone()));
                }
                let parent_id = doc
                    .root
                    .find_parent_id(node_id)
                    .map(str::to_string)
                    .ok_or(TreeError::RootImmutable)?;
                let clone = doc
                    .root
                    .find(node_id)
                    .map(|node| node.clone_with_fresh_ids(ids))
                    .ok_or_else(|| TreeError::NotFound(node_id.clone()))?;
                let id = clone.id.clone();
                doc.root.insert_at(&parent_id, clone, Position::End)?;
                Ok(MutationResult::created(id))
            }

            Mutation::SetStyle {
                node_id,
                property,
                value,
            } => modify(doc, node_id, |node| {
                Ok(match value.as_deref().map(str::trim) {
                    Some(value) if !value.is_empty() => set_style(node, property, value),
                    _ => node.styles.shift_remove(property).is_some(),
                })
            }),

            Mutation::SetAttribute {
                node_id,
                name,
                value,
            } => modify(doc, node_id, |node| {
                let before = node.clone();
                node.set_attribute(name, value.clone())?;
                Ok(*node != before)
            }),

            Mutation::SetDataAttribute {
                node_id,
                name,
                value,
            } => modify(doc, node_id, |node| {
                let name = name.trim();
                if !is_valid_name(name) {
                    return Err(TreeError::InvalidValue(format!("invalid data attribute name `{}`", name)));
                }
                Ok(match value {
                    Some(value) => {
                        node.data_attributes.insert(name.to_string(), value.clone()).as_ref() != Some(value)
                    }
                    None => node.data_attributes.shift_remove(name).is_some(),
                })
            }),

            Mutation::ToggleVisibility { node_id } => modify(doc, node_id, |node| {
                node.visible = !node.visible;
                Ok(true)
            }),

            Mutation::ToggleLock { node_id } => modify(doc, node_id, |node| {
                node.locked = !node.locked;
                Ok(true)
            }),

            Mutation::AddClass { node_id, class } => modify(doc, node_id, |node| {
                let class = class.trim();
                if class.is_empty() || node.has_class(class) {
                    return Ok(false);
                }
                node.classes.push(class.to_string());
                Ok(true)
            }),

            Mutation::RemoveClass { node_id, class } => modify(doc, node_id, |node| {
                let before = node.classes.len();
                node.classes.retain(|c| c != class.trim());
                Ok(node.classes.len() != before)
            }),

            Mutation::ToggleClass { node_id, class } => modify(doc, node_id, |node| {
                let class = class.trim();
                if class.is_empty() {
                    return Ok(false);
                }
                match node.classes.iter().position(|c| c == class) {
                    Some(index) => {
                        node.classes.remove(index);
                    }
                    None => node.classes.push(class.to_string()),
                }
                Ok(true)
            }),

            Mutation::SetClasses { node_id, classes } => modify(doc, node_id, |node| {
                let mut seen = HashSet::new();
                let parsed: Vec<String> = classes
                    .split_whitespace()
                    .filter(|c| seen.insert(*c))
                    .map(str::to_string)
                    .collect();
                if parsed == node.classes {
                    return Ok(false);
                }
                node.classes = parsed;
                Ok(true)
            }),

            Mutation::ApplyGridColumns { node_id, columns } => modify(doc, node_id, |node| {
                let Some(template) = presets::grid_template(*columns) else {
                    return Ok(false);
                };
                let NodeKind::Grid { columns: current } = &mut node.kind else {
                    return Err(wrong_kind(&node.id, "grid"));
                };
                let new_columns = *columns as u8;
                let changed = *current != new_columns;
                *current = new_columns;
                Ok(set_style(node, "gridTemplateColumns", &template) | changed)
            }),

            Mutation::SetBackgroundImage { node_id, url } => modify(doc, node_id, |node| {
                let image = match &mut node.kind {
                    NodeKind::Background {
                        background_image, ..
                    }
                    | NodeKind::Slide {
                        background_image, ..
                    } => background_image,
                    _ => return Err(wrong_kind(&node.id, "background or slide")),
                };
                let changed = image != url;
                *image = url.clone();
                let url = url.trim();
                let style_changed = if url.is_empty() {
                    node.styles.shift_remove("backgroundImage").is_some()
                } else {
                    set_style(node, "backgroundImage", &format!("url('{}')", url))
                };
                Ok(changed | style_changed)
            }),

            Mutation::SetOverlay {
                node_id,
                color,
                opacity,
            } => modify(doc, node_id, |node| {
                if opacity.is_nan() {
                    return Err(TreeError::InvalidValue("overlay opacity is NaN".to_string()));
                }
                let opacity = opacity.clamp(0.0, 1.0);
                match &mut node.kind {
                    NodeKind::Background {
                        overlay_color,
                        overlay_opacity,
                        ..
                    }
                    | NodeKind::Slide {
                        overlay_color,
                        overlay_opacity,
                        ..
                    } => {
                        let changed = overlay_color != color || *overlay_opacity != opacity;
                        *overlay_color = color.clone();
                        *overlay_opacity = opacity;
                        Ok(changed)
                    }
                    _ => Err(wrong_kind(&node.id, "background or slide")),
                }
            }),

            Mutation::AddRepeaterItem { node_id } => {
                let node = doc
                    .root
                    .find_mut(node_id)
                    .ok_or_else(|| TreeError::NotFound(node_id.clone()))?;
                let items = node
                    .items_mut()
                    .ok_or_else(|| wrong_kind(node_id, "repeater"))?;
                let item = create_repeater_item(ids);
                let id = item.id.clone();
                items.push(item);
                Ok(MutationResult::created(id))
            }

            Mutation::RemoveRepeaterItem { node_id, index } => modify(doc, node_id, |node| {
                let items = node
                    .items_mut()
                    .ok_or_else(|| wrong_kind(node_id, "repeater"))?;
                if *index >= items.len() || items.len() <= 1 {
                    return Ok(false);
                }
                items.remove(*index);
                Ok(true)
            }),

            Mutation::SetRepeaterLayout {
                node_id,
                layout,
                items_per_row,
            } => modify(doc, node_id, |node| {
                let per_row = (*items_per_row).max(1);
                let NodeKind::Repeater {
                    layout: current_layout,
                    items_per_row: current_per_row,
                    ..
                } = &mut node.kind
                else {
                    return Err(wrong_kind(&node.id, "repeater"));
                };
                let mut changed = *current_layout != *layout || *current_per_row != per_row;
                *current_layout = *layout;
                *current_per_row = per_row;

                match layout {
                    ItemLayout::Grid => {
                        changed |= set_style(node, "display", "grid");
                        changed |= set_style(
                            node,
                            "gridTemplateColumns",
                            &format!("repeat({}, 1fr)", per_row),
                        );
                        changed |= node.styles.shift_remove("flexDirection").is_some();
                    }
                    ItemLayout::List => {
                        changed |= set_style(node, "display", "flex");
                        changed |= set_style(node, "flexDirection", "column");
                        changed |= node.styles.shift_remove("gridTemplateColumns").is_some();
                    }
                    ItemLayout::Carousel => {}
                }
                Ok(changed)
            }),

            Mutation::ApplyButtonVariant { node_id, variant } => {
                Self::apply_button_preset(doc, node_id, presets::button_variant(variant))
            }

            Mutation::ApplyButtonSize { node_id, size } => {
                Self::apply_button_preset(doc, node_id, presets::button_size(size))
            }

            Mutation::ApplyIconSize { node_id, size } => modify(doc, node_id, |node| {
                if !matches!(node.kind, NodeKind::Icon { .. }) {
                    return Err(wrong_kind(&node.id, "icon"));
                }
                Ok(match presets::icon_size(size) {
                    Some(font_size) => set_style(node, "fontSize", font_size),
                    None => false,
                })
            }),

            Mutation::Resize {
                node_id,
                width,
                height,
                handle,
            } => modify(doc, node_id, |node| {
                let mut changed = false;
                if matches!(handle, ResizeHandle::E | ResizeHandle::Se) {
                    changed |= set_style(node, "width", &format!("{}px", width));
                }
                if matches!(handle, ResizeHandle::S | ResizeHandle::Se) {
                    changed |= set_style(node, "height", &format!("{}px", height));
                }
                Ok(changed)
            }),
        }
    }

    fn apply_insert(
        doc: &mut Document,
        ids: &mut IdGenerator,
        parent_id: &str,
        position: Position,
        node: &Node,
    ) -> TreeResult<MutationResult> {
        let existing: HashSet<&str> = doc.all_ids().into_iter().collect();
        let incoming = node.all_ids();
        let unique: HashSet<&str> = incoming.iter().copied().collect();
        let collides =
            unique.len() != incoming.len() || incoming.iter().any(|id| existing.contains(id));

        let node = if collides {
            node.clone_with_fresh_ids(ids)
        } else {
            ids.reserve(incoming);
            node.clone()
        };
        let id = node.id.clone();
        doc.root.insert_at(parent_id, node, position)?;
        Ok(MutationResult::created(id))
    }

    fn apply_button_preset(
        doc: &mut Document,
        node_id: &str,
        preset: Option<StylePreset>,
    ) -> TreeResult<MutationResult> {
        modify(doc, node_id, |node| {
            if !matches!(node.kind, NodeKind::Button { .. }) {
                return Err(wrong_kind(&node.id, "button"));
            }
            let Some(preset) = preset else {
                return Ok(false);
            };
            Ok(preset
                .iter()
                .fold(false, |changed, (key, value)| set_style(node, key, value) | changed))
        })
    }
}

fn modify<F>(doc: &mut Document, node_id: &str, patch: F) -> TreeResult<MutationResult>
where
    F: FnOnce(&mut Node) -> TreeResult<bool>,
{
    let node = doc
        .root
        .find_mut(node_id)
        .ok_or_else(|| TreeError::NotFound(node_id.to_string()))?;
    patch(node).map(MutationResult::changed)
}

fn set_style(node: &mut Node, key: &str, value: &str) -> bool {
    if node.styles.get(key).map(String::as_str) == Some(value) {
        return false;
    }
    node.styles.insert(key.to_string(), value.to_string());
    true
}

fn wrong_kind(id: &str, expected: &'static str) -> TreeError {
    TreeError::WrongKind {
        id: id.to_string(),
        expected,
    }
}
