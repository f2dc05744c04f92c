//! # Block Document
//!
//! The root aggregate: one container node plus the side tables that travel
//! with it (`variables` and `cssClasses`).

use crate::id_generator::IdGenerator;
use crate::node::{Node, NodeKind};
use crate::visitor::{walk_node_mut, VisitorMut};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DOCUMENT_VERSION: &str = "1.0";

const ROOT_CLASSES: &[&str] = &["pd-block", "grid-row"];

/// Named template variable; everything but `name` and `defaultValue` is opaque
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: None,
            extra: IndexMap::new(),
        }
    }

    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Default value as text, if it is a scalar
    pub fn default_text(&self) -> Option<String> {
        match self.default_value.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "default_version")]
    pub version: String,
    pub root: Node,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub css_classes: IndexSet<String>,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

impl Document {
    /// Empty document: a flex-column root container with a fresh id
    pub fn new(ids: &mut IdGenerator) -> Self {
        let root = Node::new(ids.new_id(), NodeKind::Container)
            .with_classes(ROOT_CLASSES)
            .with_styles(&[
                ("display", "flex"),
                ("flexDirection", "column"),
                ("alignItems", "center"),
                ("gap", "1rem"),
                ("padding", "2rem"),
            ]);

        Self {
            version: default_version(),
            root,
            variables: Vec::new(),
            css_classes: ROOT_CLASSES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.root.find(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.root.find_mut(id)
    }

    /// Every id in the document, repeater items included
    pub fn all_ids(&self) -> Vec<&str> {
        self.root.all_ids()
    }

    /// Ids that occur more than once, in first-repeat order
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for id in self.all_ids() {
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }

    /// Union `classes` into `cssClasses`; returns how many were new
    pub fn merge_css_classes<I, S>(&mut self, classes: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.css_classes.len();
        self.css_classes.extend(classes.into_iter().map(Into::into));
        self.css_classes.len() - before
    }

    /// Give a fresh id to every repeated occurrence of an id
    ///
    /// The first occurrence (pre-order, children before items) keeps its id.
    /// All ids in the document are reserved in `ids` first. Returns how many
    /// nodes were renamed.
    pub fn reissue_duplicate_ids(&mut self, ids: &mut IdGenerator) -> usize {
        ids.reserve(self.all_ids());
        let mut dedup = Dedup {
            seen: HashSet::new(),
            ids,
            reissued: 0,
        };
        dedup.visit_document_mut(self);
        dedup.reissued
    }

    /// Look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

struct Dedup<'a> {
    seen: HashSet<String>,
    ids: &'a mut IdGenerator,
    reissued: usize,
}

impl VisitorMut for Dedup<'_> {
    fn visit_node_mut(&mut self, node: &mut Node) {
        if !self.seen.insert(node.id.clone()) {
            node.id = self.ids.new_id();
            self.seen.insert(node.id.clone());
            self.reissued += 1;
        }
        walk_node_mut(self, node);
    }
}
