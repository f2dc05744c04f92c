use crate::document::Document;
use crate::node::Node;

/// Visitor pattern for traversing the block tree immutably
///
/// The default implementations walk every node pre-order: first `children`,
/// then repeater `items`. Override `visit_node` to act on each node and call
/// [`walk_node`] to keep descending.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        self.visit_node(&doc.root);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_item(&mut self, item: &Node) {
        self.visit_node(item);
    }
}

/// Mutable visitor pattern for rewriting nodes in place
pub trait VisitorMut: Sized {
    fn visit_document_mut(&mut self, doc: &mut Document) {
        self.visit_node_mut(&mut doc.root);
    }

    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }

    fn visit_item_mut(&mut self, item: &mut Node) {
        self.visit_node_mut(item);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for child in &node.children {
        visitor.visit_node(child);
    }
    if let Some(items) = node.items() {
        for item in items {
            visitor.visit_item(item);
        }
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    for child in &mut node.children {
        visitor.visit_node_mut(child);
    }
    if let Some(items) = node.items_mut() {
        for item in items {
            visitor.visit_item_mut(item);
        }
    }
}
