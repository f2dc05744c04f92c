//! # Blockforge Document
//!
//! The block tree behind the visual editor: element nodes, the id-addressed
//! tree operations over them, and the default element factory.
//!
//! ## Layout
//!
//! ```text
//! Document
//!   ├─ version
//!   ├─ root: Node (container, never removed)
//!   │    ├─ children: [Node, ...]
//!   │    └─ items: [Node, ...]   (repeater only)
//!   ├─ variables
//!   └─ cssClasses
//! ```
//!
//! ## Guarantees
//!
//! 1. **Unique ids**: every id is unique across `children` and repeater `items`
//! 2. **Acyclic**: a node is never moved into itself or its own subtree
//! 3. **Stable order**: reordering only touches the siblings it names
//!
//! ```rust,ignore
//! use blockforge_document::{create_element, Document, IdGenerator, Position};
//!
//! let mut ids = IdGenerator::new();
//! let mut doc = Document::new(&mut ids);
//! let heading = create_element("heading", &mut ids);
//! let root_id = doc.root.id.clone();
//! doc.root.insert_at(&root_id, heading, Position::End)?;
//! ```

mod document;
mod error;
mod factory;
mod id_generator;
mod node;
pub mod presets;
mod styles;
mod tree;
pub mod visitor;

pub use document::{Document, Variable, DOCUMENT_VERSION};
pub use error::{TreeError, TreeResult};
pub use factory::{
    create_element, create_raw_html, create_repeater_item, DEFAULT_GRID_COLUMNS,
    DEFAULT_REPEATER_ITEMS,
};
pub use id_generator::IdGenerator;
pub use node::{is_valid_name, ItemLayout, Node, NodeKind, Styles};
pub use styles::StyleMap;
pub use tree::{Direction, NodePath, Position};
pub use visitor::{Visitor, VisitorMut};
