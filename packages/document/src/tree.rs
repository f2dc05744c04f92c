//! # Tree Operations
//!
//! Id-addressed primitives over a node and its `children`. Every lookup is
//! depth-first, pre-order and stops at the first match; ids are unique, so the
//! first match is the only one.
//!
//! Writes locate their target as an index path from the root and then walk
//! that path mutably, so every change lands in the live tree.
//!
//! ## Position semantics
//!
//! - [`Position::End`] (any negative index on the wire) appends
//! - [`Position::Index`] past the end is clamped to the child count, which
//!   also appends
//! - For [`Node::move_node`] the index is interpreted after the node has been
//!   detached from its old parent

use crate::error::{TreeError, TreeResult};
use crate::id_generator::IdGenerator;
use crate::node::{Node, NodeKind};
use serde::{Deserialize, Serialize};

/// Index path from a node to one of its descendants through `children`
pub type NodePath = Vec<usize>;

/// Insertion point within a container's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Position {
    Index(usize),
    #[default]
    End,
}

impl Position {
    /// Index into a list of `len` children
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Position::Index(index) => index.min(len),
            Position::End => len,
        }
    }
}

impl From<i64> for Position {
    fn from(value: i64) -> Self {
        if value < 0 {
            Position::End
        } else {
            Position::Index(usize::try_from(value).unwrap_or(usize::MAX))
        }
    }
}

impl From<Position> for i64 {
    fn from(position: Position) -> Self {
        match position {
            Position::Index(index) => i64::try_from(index).unwrap_or(i64::MAX),
            Position::End => -1,
        }
    }
}

/// Sibling step for [`Node::reorder_sibling`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// `-1` is up, `+1` is down
    pub fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            -1 => Some(Direction::Up),
            1 => Some(Direction::Down),
            _ => None,
        }
    }
}

impl Node {
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Path to the node with `id`; empty for `self`
    pub fn path_to(&self, id: &str) -> Option<NodePath> {
        if self.id == id {
            return Some(Vec::new());
        }
        for (index, child) in self.children.iter().enumerate() {
            if let Some(mut path) = child.path_to(id) {
                path.insert(0, index);
                return Some(path);
            }
        }
        None
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    /// Id of the direct parent; `None` for `self` or a missing id
    pub fn find_parent_id(&self, id: &str) -> Option<&str> {
        let path = self.path_to(id)?;
        let (_, parent_path) = path.split_last()?;
        self.node_at(parent_path).map(|parent| parent.id.as_str())
    }

    /// Apply `patch` to the node with `id`; returns whether it matched
    pub fn modify<F>(&mut self, id: &str, patch: F) -> bool
    where
        F: FnOnce(&mut Node),
    {
        match self.find_mut(id) {
            Some(node) => {
                patch(node);
                true
            }
            None => false,
        }
    }

    /// True if `target_id` is this node's id or any descendant's
    pub fn is_descendant_of(&self, target_id: &str) -> bool {
        self.find(target_id).is_some()
    }

    /// Detach the node with `id` (and its subtree) from its parent
    pub fn remove_descendant(&mut self, id: &str) -> TreeResult<Node> {
        if self.id == id {
            return Err(TreeError::RootImmutable);
        }
        let (parent, index) = self.parent_slot_mut(id)?;
        Ok(parent.children.remove(index))
    }

    /// Insert `node` into the children of `container_id`; returns the index used
    pub fn insert_at(&mut self, container_id: &str, node: Node, position: Position) -> TreeResult<usize> {
        let container = self
            .find_mut(container_id)
            .ok_or_else(|| TreeError::NotFound(container_id.to_string()))?;
        if !container.is_container() {
            return Err(TreeError::NotAContainer(container_id.to_string()));
        }
        let index = position.resolve(container.children.len());
        container.children.insert(index, node);
        Ok(index)
    }

    /// Move the node with `id` into `container_id`, rejecting cycles
    pub fn move_node(&mut self, id: &str, container_id: &str, position: Position) -> TreeResult<usize> {
        if self.id == id {
            return Err(TreeError::RootImmutable);
        }
        let node = self
            .find(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        if node.is_descendant_of(container_id) {
            return Err(TreeError::CycleDetected {
                node_id: id.to_string(),
                target_id: container_id.to_string(),
            });
        }
        let container = self
            .find(container_id)
            .ok_or_else(|| TreeError::NotFound(container_id.to_string()))?;
        if !container.is_container() {
            return Err(TreeError::NotAContainer(container_id.to_string()));
        }

        let node = self.remove_descendant(id)?;
        self.insert_at(container_id, node, position)
    }

    /// Swap with the previous/next sibling; `Ok(false)` at the bounds
    pub fn reorder_sibling(&mut self, id: &str, direction: Direction) -> TreeResult<bool> {
        let (parent, index) = self.parent_slot_mut(id)?;
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&i| i < parent.children.len()),
        };
        match target {
            Some(target) => {
                parent.children.swap(index, target);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move within the current parent to `new_index` (clamped)
    pub fn reorder_to_position(&mut self, id: &str, new_index: usize) -> TreeResult<bool> {
        let (parent, index) = self.parent_slot_mut(id)?;
        let node = parent.children.remove(index);
        let target = new_index.min(parent.children.len());
        parent.children.insert(target, node);
        Ok(target != index)
    }

    /// Last among siblings (painted on top)
    pub fn bring_to_front(&mut self, id: &str) -> TreeResult<bool> {
        self.reorder_to_position(id, usize::MAX)
    }

    /// First among siblings (painted behind)
    pub fn send_to_back(&mut self, id: &str) -> TreeResult<bool> {
        self.reorder_to_position(id, 0)
    }

    /// Deep copy with a fresh id on this node and every descendant, repeater items included
    pub fn clone_with_fresh_ids(&self, ids: &mut IdGenerator) -> Node {
        let mut clone = self.clone();
        reassign_ids(&mut clone, ids);
        clone
    }

    /// Every id in the subtree, pre-order, including repeater items
    pub fn all_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_ids(self, &mut out);
        out
    }

    fn parent_slot_mut(&mut self, id: &str) -> TreeResult<(&mut Node, usize)> {
        let path = self
            .path_to(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        let (&index, parent_path) = path
            .split_last()
            .ok_or(TreeError::RootImmutable)?;
        let parent = self
            .node_at_mut(parent_path)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        Ok((parent, index))
    }
}

fn reassign_ids(node: &mut Node, ids: &mut IdGenerator) {
    node.id = ids.new_id();
    for child in &mut node.children {
        reassign_ids(child, ids);
    }
    if let NodeKind::Repeater { items, .. } = &mut node.kind {
        for item in items {
            reassign_ids(item, ids);
        }
    }
}

fn collect_ids<'a>(node: &'a Node, out: &mut Vec<&'a str>) {
    out.push(&node.id);
    for child in &node.children {
        collect_ids(child, out);
    }
    if let Some(items) = node.items() {
        for item in items {
            collect_ids(item, out);
        }
    }
}
