use blockforge_document::{is_valid_name, Document, Node, NodeKind, StyleMap};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Inline tags kept in heading and text markup; everything else is stripped
const SAFE_INLINE_TAGS: &[&str] = &["strong", "em", "b", "i", "u", "a", "br", "span"];

/// Options for HTML export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Emit `style` attributes; when off, presentation relies on classes only
    pub inline_styles: bool,
    /// Strip whitespace between tags
    pub minify: bool,
    /// Wrap the output in the root container instead of exporting its children
    pub include_root: bool,
    /// One element per line, indented
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Values for `{{name}}` placeholders, overriding variable defaults
    pub variable_values: IndexMap<String, String>,
    /// Style-key to CSS-property table
    #[serde(skip)]
    pub style_map: StyleMap,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            inline_styles: true,
            minify: false,
            include_root: false,
            pretty: true,
            indent: "  ".to_string(),
            variable_values: IndexMap::new(),
            style_map: StyleMap::builtin(),
        }
    }
}

struct Context<'a> {
    options: &'a ExportOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a ExportOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn pretty(&self) -> bool {
        self.options.pretty && !self.options.minify
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.pretty() {
            self.add_indent();
        }
        self.add(text);
        if self.pretty() {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Export a block document to HTML
///
/// Never fails: malformed content degrades to escaped text.
pub fn compile_to_html(document: &Document, options: &ExportOptions) -> String {
    let mut ctx = Context::new(options);

    if options.include_root {
        compile_node(&document.root, &mut ctx);
    } else {
        for child in &document.root.children {
            compile_node(child, &mut ctx);
        }
    }

    let html = substitute_variables(&ctx.get_output(), document, options);
    let html = if options.minify { minify_html(&html) } else { html };

    debug!(bytes = html.len(), minify = options.minify, "Exported HTML");
    html
}

/// Export one subtree; placeholders are left as they are
pub fn compile_node_to_html(node: &Node, options: &ExportOptions) -> String {
    let mut ctx = Context::new(options);
    compile_node(node, &mut ctx);
    let html = ctx.get_output();
    if options.minify {
        minify_html(&html)
    } else {
        html
    }
}

fn compile_node(node: &Node, ctx: &mut Context) {
    // hidden nodes take their whole subtree with them
    if !node.visible {
        return;
    }

    match &node.kind {
        NodeKind::Heading { content } | NodeKind::Text { content } => {
            let attrs = build_attributes(node, &node.classes, ctx);
            ctx.add_line(&format!(
                "<{tag}{attrs}>{}</{tag}>",
                rich_content(content, ctx.options.inline_styles),
                tag = tag_name(node)
            ));
        }

        NodeKind::Image {
            src,
            alt,
            srcset,
            sizes,
            width,
            height,
        } => {
            let mut img = format!("src=\"{}\" alt=\"{}\"", escape_html(src), escape_html(alt));
            for (name, value) in [
                ("srcset", srcset),
                ("sizes", sizes),
                ("width", width),
                ("height", height),
            ] {
                push_optional_attribute(&mut img, name, value);
            }
            let attrs = build_attributes(node, &node.classes, ctx);
            ctx.add_line(&format!("<img {} loading=\"lazy\"{}>", img, attrs));
        }

        NodeKind::Source {
            srcset,
            sizes,
            media,
            mime_type,
        } => {
            if srcset.is_empty() {
                return;
            }
            let mut source = format!("srcset=\"{}\"", escape_html(srcset));
            for (name, value) in [("sizes", sizes), ("media", media), ("type", mime_type)] {
                push_optional_attribute(&mut source, name, value);
            }
            ctx.add_line(&format!("<source {}>", source));
        }

        NodeKind::Icon { icon_class } => {
            let mut classes = node.classes.clone();
            for class in icon_class.split_whitespace() {
                if !classes.iter().any(|c| c == class) {
                    classes.push(class.to_string());
                }
            }
            let attrs = build_attributes(node, &classes, ctx);
            ctx.add_line(&format!("<{tag}{attrs}></{tag}>", tag = tag_name(node)));
        }

        NodeKind::Button { content, href } => {
            let attrs = build_attributes(node, &node.classes, ctx);
            let href = if tag_name(node) == "a" {
                let href = if href.is_empty() { "#" } else { href.as_str() };
                format!(" href=\"{}\"", escape_html(href))
            } else {
                String::new()
            };
            ctx.add_line(&format!(
                "<{tag}{href}{attrs}>{}</{tag}>",
                escape_html(content),
                tag = tag_name(node)
            ));
        }

        NodeKind::Separator => {
            let attrs = build_attributes(node, &node.classes, ctx);
            if is_void_tag(tag_name(node)) {
                ctx.add_line(&format!("<{}{}>", tag_name(node), attrs));
            } else {
                ctx.add_line(&format!("<{tag}{attrs}></{tag}>", tag = tag_name(node)));
            }
        }

        NodeKind::RawHtml { content } => {
            // trusted authored markup
            if ctx.options.inline_styles {
                ctx.add_line(content);
            } else {
                ctx.add_line(&strip_style_attributes(content));
            }
        }

        _ => compile_container(node, ctx),
    }
}

fn compile_container(node: &Node, ctx: &mut Context) {
    let attrs = build_attributes(node, &node.classes, ctx);
    let open = format!("<{}{}>", tag_name(node), attrs);

    if is_void_tag(tag_name(node)) {
        ctx.add_line(&open);
        return;
    }

    let content = match &node.kind {
        NodeKind::Custom { content, .. } if !content.is_empty() => {
            rich_content(content, ctx.options.inline_styles)
        }
        _ => String::new(),
    };
    let items: &[Node] = node.items().map(Vec::as_slice).unwrap_or_default();
    let has_body = node
        .children
        .iter()
        .chain(items)
        .any(|child| child.visible);

    if !has_body {
        ctx.add_line(&format!("{}{}</{}>", open, content, tag_name(node)));
        return;
    }

    ctx.add_line(&format!("{}{}", open, content));
    ctx.indent();
    for child in node.children.iter().chain(items) {
        compile_node(child, ctx);
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag_name(node)));
}

/// ` class=".." style=".." data-*=".."`, or empty
fn build_attributes(node: &Node, classes: &[String], ctx: &Context) -> String {
    let mut attrs = String::new();

    let class_list = classes
        .iter()
        .filter(|c| !c.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if !class_list.is_empty() {
        attrs.push_str(&format!(" class=\"{}\"", escape_html(&class_list)));
    }

    if ctx.options.inline_styles {
        let style = ctx.options.style_map.inline_style(&node.styles);
        if !style.is_empty() {
            attrs.push_str(&format!(" style=\"{}\"", escape_html(&style)));
        }
    }

    for (name, value) in node.data_attributes.iter().filter(|(name, _)| is_valid_name(name)) {
        attrs.push_str(&format!(" data-{}=\"{}\"", escape_html(name), escape_html(value)));
    }

    attrs
}

/// Element name to emit; unusable names from loaded documents fall back to `div`
fn tag_name(node: &Node) -> &str {
    if is_valid_name(&node.tag) {
        &node.tag
    } else {
        "div"
    }
}

fn push_optional_attribute(out: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }
}

/// Plain text is escaped; markup keeps only the safe inline tags
///
/// Event-handler attributes are always dropped from kept tags, `style` only
/// when inline styles are off.
fn rich_content(content: &str, keep_styles: bool) -> String {
    if !markup_pattern().is_match(content) {
        return escape_html(content);
    }

    let without_comments = comment_pattern().replace_all(content, "");
    tag_pattern()
        .replace_all(&without_comments, |caps: &Captures| {
            let name = caps[1].to_ascii_lowercase();
            if !SAFE_INLINE_TAGS.contains(&name.as_str()) {
                return String::new();
            }
            unsafe_attribute_pattern()
                .replace_all(&caps[0], |attr: &Captures| {
                    let name = attr[1].to_ascii_lowercase();
                    if name == "style" && keep_styles {
                        attr[0].to_string()
                    } else {
                        String::new()
                    }
                })
                .into_owned()
        })
        .into_owned()
}

/// Drop `style` attributes from every tag, leaving the markup otherwise as is
fn strip_style_attributes(content: &str) -> String {
    tag_pattern()
        .replace_all(content, |caps: &Captures| {
            style_attribute_pattern().replace_all(&caps[0], "").into_owned()
        })
        .into_owned()
}

/// Replace `{{name}}` with the supplied value or the variable's default
fn substitute_variables(html: &str, document: &Document, options: &ExportOptions) -> String {
    placeholder_pattern()
        .replace_all(html, |caps: &Captures| {
            let name = &caps[1];
            let value = options
                .variable_values
                .get(name)
                .cloned()
                .or_else(|| document.variable(name).and_then(|v| v.default_text()));
            match value {
                Some(value) => escape_html(&value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Collapse whitespace between tags
///
/// Whitespace between two inline tags is text (`<b>a</b> <i>b</i>`) and is
/// kept.
fn minify_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for gap in between_tags_pattern().find_iter(html) {
        // the match spans `>` .. `<`; keep both brackets
        let (open, close) = (gap.start() + 1, gap.end() - 1);
        out.push_str(&html[last..open]);
        if is_inline_tag(last_tag(&html[..open])) && is_inline_tag(first_tag(&html[close..])) {
            out.push_str(&html[open..close]);
        }
        last = close;
    }
    out.push_str(&html[last..]);

    out.trim().to_string()
}

/// Name of the tag that ends `html`
fn last_tag(html: &str) -> Option<String> {
    let start = html.rfind('<')?;
    tag_pattern()
        .captures(&html[start..])
        .map(|caps| caps[1].to_ascii_lowercase())
}

/// Name of the tag that starts `html`
fn first_tag(html: &str) -> Option<String> {
    let end = html.find('>')?;
    tag_pattern()
        .captures(&html[..=end])
        .map(|caps| caps[1].to_ascii_lowercase())
}

fn is_inline_tag(name: Option<String>) -> bool {
    name.is_some_and(|name| name != "br" && SAFE_INLINE_TAGS.contains(&name.as_str()))
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid markup pattern"))
}

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"</?\s*([a-zA-Z][a-zA-Z0-9-]*)[^>]*>").expect("valid tag pattern")
    })
}

fn unsafe_attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\s(on[a-z]+|style)\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#)
            .expect("valid attribute pattern")
    })
}

fn style_attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\sstyle\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid style pattern")
    })
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder pattern"))
}

fn between_tags_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r">\s+<").expect("valid whitespace pattern"))
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
