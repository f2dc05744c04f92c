//! # Blockforge HTML Compiler
//!
//! Renders a block document to static HTML.
//!
//! ## Rules
//!
//! - Root children are exported; the root wrapper only with `include_root`
//! - Nodes with `visible: false` are skipped with their whole subtree
//! - Attributes are emitted as `class`, `style`, then `data-*`
//! - `raw-html` content is emitted verbatim; heading and text markup keeps
//!   only safe inline tags
//! - `{{name}}` placeholders resolve against `variableValues`, then the
//!   document's variable defaults
//!
//! ```rust,ignore
//! use blockforge_compiler_html::{compile_to_html, ExportOptions};
//!
//! let html = compile_to_html(&document, &ExportOptions {
//!     inline_styles: false,
//!     minify: true,
//!     ..Default::default()
//! });
//! ```

mod compiler;

pub use compiler::{compile_node_to_html, compile_to_html, ExportOptions};

#[cfg(test)]
mod tests;
