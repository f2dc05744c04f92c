//! # Blockforge CSS Compiler
//!
//! Stylesheet handling for block documents:
//!
//! - [`scope_css`] confines an external stylesheet to a preview container
//! - [`StyleClassCompiler`] turns inline node styles into shared classes

mod classes;
mod scope;

pub use classes::{
    canonicalize, class_name, Declarations, StyleClassCompiler, DEFAULT_CLASS_PREFIX,
};
pub use scope::{preview_stylesheet, scope_css, DEFAULT_SCOPE_SELECTOR};

use blockforge_document::Document;

/// Move every node's inline styles into classes and return the stylesheet
pub fn compile_to_css(document: &mut Document, prefix: &str, minify: bool) -> String {
    let mut compiler = StyleClassCompiler::new(prefix);
    compiler.compile(document);
    compiler.to_css(minify)
}
