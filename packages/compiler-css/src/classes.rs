//! # Style Classes
//!
//! Moves inline node styles into shared, content-addressed CSS classes so a
//! document can be exported without any `style` attribute.
//!
//! ## Design
//!
//! - Styles are canonicalized before hashing, so equivalent declarations
//!   (`16.4px` vs `16px`, `#FFF` vs `#fff`) share one class
//! - Class names are `<prefix><crc32 as 8 hex digits>`
//! - Computed browser defaults (`opacity: 1`, `position: static`, ...) are
//!   dropped; deliberate resets such as `text-decoration: none` are kept

use blockforge_document::visitor::{walk_node_mut, VisitorMut};
use blockforge_document::{Document, Node, StyleMap, Styles};
use indexmap::IndexMap;
use tracing::debug;

pub const DEFAULT_CLASS_PREFIX: &str = "bb-s";

/// Canonical `(property, value)` declarations, sorted by property
pub type Declarations = Vec<(String, String)>;

const COMPUTED_DEFAULTS: &[(&str, &[&str])] = &[
    ("opacity", &["1", "100%"]),
    ("background-color", &["transparent", "rgba(0,0,0,0)"]),
    ("border-style", &["none"]),
    ("display", &["block"]),
    ("position", &["static"]),
    ("visibility", &["visible"]),
];

/// Normalize a style map into sorted CSS declarations
pub fn canonicalize(styles: &Styles, style_map: &StyleMap) -> Declarations {
    let mut declarations: Declarations = style_map
        .declarations(styles)
        .into_iter()
        .map(|(property, value)| (property.to_string(), normalize_value(value)))
        .filter(|(property, value)| {
            !matches!(value.as_str(), "inherit" | "initial") && !is_computed_default(property, value)
        })
        .collect();

    declarations.sort();
    declarations.dedup_by(|a, b| a.0 == b.0);
    declarations
}

fn is_computed_default(property: &str, value: &str) -> bool {
    COMPUTED_DEFAULTS
        .iter()
        .any(|(p, defaults)| *p == property && defaults.contains(&value))
}

/// Round px values, lowercase hex colours and compact `rgb()`/`rgba()`
fn normalize_value(value: &str) -> String {
    let value = value.trim();

    if let Some(number) = value.strip_suffix("px") {
        if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit() || c == '.') {
            if let Ok(n) = number.parse::<f64>() {
                return format!("{}px", n.round() as i64);
            }
        }
    }

    if value.starts_with('#')
        && (4..=9).contains(&value.len())
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
    {
        return value.to_ascii_lowercase();
    }

    let lower = value.to_ascii_lowercase();
    for function in ["rgba", "rgb"] {
        if let Some(args) = lower
            .strip_prefix(function)
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let args = args
                .split(',')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(",");
            return format!("{}({})", function, args);
        }
    }

    value.to_string()
}

/// Content-addressed class name for `declarations`; `None` when empty
pub fn class_name(prefix: &str, declarations: &Declarations) -> Option<String> {
    if declarations.is_empty() {
        return None;
    }
    let mut hasher = crc32fast::Hasher::new();
    for (property, value) in declarations {
        hasher.update(property.as_bytes());
        hasher.update(b":");
        hasher.update(value.as_bytes());
        hasher.update(b";");
    }
    Some(format!("{}{:08x}", prefix, hasher.finalize()))
}

/// Collects class rules while stripping inline styles from a document
#[derive(Debug, Clone)]
pub struct StyleClassCompiler {
    prefix: String,
    style_map: StyleMap,
    rules: IndexMap<String, Declarations>,
}

impl StyleClassCompiler {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            style_map: StyleMap::builtin(),
            rules: IndexMap::new(),
        }
    }

    pub fn with_style_map(mut self, style_map: StyleMap) -> Self {
        self.style_map = style_map;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Class name to rule, in first-use order
    pub fn rules(&self) -> &IndexMap<String, Declarations> {
        &self.rules
    }

    /// Replace each styled node's inline styles with its style class
    ///
    /// Generated classes are merged into the document's `cssClasses`. Returns
    /// how many nodes were converted.
    pub fn compile(&mut self, document: &mut Document) -> usize {
        let mut pass = ClassPass {
            compiler: self,
            converted: 0,
            used: Vec::new(),
        };
        pass.visit_document_mut(document);

        let ClassPass { converted, used, .. } = pass;
        let added = document.merge_css_classes(used);
        debug!(converted, rules = self.rules.len(), added, "Compiled style classes");
        converted
    }

    /// Class for one node's current styles, recording its rule
    pub fn class_for(&mut self, styles: &Styles) -> Option<String> {
        let declarations = canonicalize(styles, &self.style_map);
        let name = class_name(&self.prefix, &declarations)?;
        self.rules.entry(name.clone()).or_insert(declarations);
        Some(name)
    }

    /// Whether `class` looks like one this compiler generates
    pub fn is_generated_class(&self, class: &str) -> bool {
        class
            .strip_prefix(self.prefix.as_str())
            .is_some_and(|hash| hash.len() == 8 && hash.chars().all(|c| c.is_ascii_hexdigit()))
    }

    /// Render the collected rules
    pub fn to_css(&self, minify: bool) -> String {
        let mut css = String::new();
        for (class, declarations) in &self.rules {
            if minify {
                let body = declarations
                    .iter()
                    .map(|(p, v)| format!("{}:{}", p, v))
                    .collect::<Vec<_>>()
                    .join(";");
                css.push_str(&format!(".{}{{{}}}", class, body));
            } else {
                css.push_str(&format!(".{} {{\n", class));
                for (property, value) in declarations {
                    css.push_str(&format!("  {}: {};\n", property, value));
                }
                css.push_str("}\n");
            }
        }
        css
    }
}

impl Default for StyleClassCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_PREFIX)
    }
}

struct ClassPass<'a> {
    compiler: &'a mut StyleClassCompiler,
    converted: usize,
    used: Vec<String>,
}

impl VisitorMut for ClassPass<'_> {
    fn visit_node_mut(&mut self, node: &mut Node) {
        if !node.styles.is_empty() {
            self.convert(node);
        }
        walk_node_mut(self, node);
    }
}

impl ClassPass<'_> {
    fn convert(&mut self, node: &mut Node) {
        let class = self.compiler.class_for(&node.styles);
        node.styles.clear();

        let compiler = &*self.compiler;
        node.classes.retain(|c| !compiler.is_generated_class(c));

        if let Some(class) = class {
            node.classes.push(class.clone());
            if !self.used.contains(&class) {
                self.used.push(class);
            }
        }
        self.converted += 1;
    }
}
