//! # Stylesheet Scoping
//!
//! Rewrites an external stylesheet so every rule only matches inside one
//! container element.
//!
//! ## Rules
//!
//! - `:root`, `html` and `body` become the scope selector
//! - every other selector is prefixed with `<scope> `
//! - selectors already starting with the scope are left alone
//! - grouping at-rules (`@media`, `@supports`, ...) have their inner rules
//!   scoped; other block at-rules (`@keyframes`, `@font-face`, ...) and
//!   statement at-rules (`@import`, `@charset`) are copied verbatim
//! - comments and strings are copied verbatim and never parsed as rules

use tracing::debug;

/// Scope selector used by the editor canvas
pub const DEFAULT_SCOPE_SELECTOR: &str = ".vbb-canvas-preview";

/// At-rules whose body is itself a rule list
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "layer", "container", "document", "-moz-document"];

/// Selectors that name the document itself
const DOCUMENT_SELECTORS: &[&str] = &[":root", "html", "body"];

/// Confine every rule of `css` to elements inside `scope`
pub fn scope_css(css: &str, scope: &str) -> String {
    let scope = scope.trim();
    let mut out = String::with_capacity(css.len() + css.len() / 4);
    let rules = scope_rule_list(css, scope, &mut out);
    debug!(rules, scope, "Scoped stylesheet");
    out
}

/// Scoped stylesheet preceded by a label comment, ready for a preview `<style>` tag
pub fn preview_stylesheet(external: &str, label: &str, scope: &str) -> String {
    let label = label.replace("*/", "* /");
    format!("/* {} (scoped) */\n{}", label, scope_css(external, scope))
}

/// Scope a sequence of rules; returns how many selectors were rewritten
fn scope_rule_list(css: &str, scope: &str, out: &mut String) -> usize {
    let bytes = css.as_bytes();
    let mut rewritten = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        let start = skip_trivia(bytes, pos);
        out.push_str(&css[pos..start]);
        pos = start;
        if pos >= bytes.len() {
            break;
        }

        if bytes[pos] == b'}' {
            // stray closer
            out.push('}');
            pos += 1;
            continue;
        }

        let (stop, delimiter) = scan_until(bytes, pos, &[b'{', b';']);
        let prelude = &css[pos..stop];

        match delimiter {
            Some(b';') => {
                out.push_str(prelude);
                out.push(';');
                pos = stop + 1;
            }
            Some(_) => {
                let Some(close) = matching_brace(bytes, stop) else {
                    // unterminated block
                    out.push_str(&css[pos..]);
                    break;
                };
                let body = &css[stop + 1..close];

                if let Some(name) = at_rule_name(prelude) {
                    out.push_str(prelude);
                    out.push('{');
                    if GROUPING_AT_RULES.contains(&name.as_str()) {
                        rewritten += scope_rule_list(body, scope, out);
                    } else {
                        out.push_str(body);
                    }
                    out.push('}');
                } else {
                    out.push_str(&scope_selector_list(prelude, scope));
                    out.push('{');
                    out.push_str(body);
                    out.push('}');
                    rewritten += 1;
                }
                pos = close + 1;
            }
            None => {
                out.push_str(prelude);
                break;
            }
        }
    }

    rewritten
}

/// Prefix each comma-separated selector of `prelude`; trailing whitespace is kept
fn scope_selector_list(prelude: &str, scope: &str) -> String {
    let selectors = prelude.trim_end();
    let trailing = &prelude[selectors.len()..];

    let scoped = split_top_level(selectors, b',')
        .into_iter()
        .map(|selector| scope_selector(selector.trim(), scope))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{}{}", scoped, trailing)
}

fn scope_selector(selector: &str, scope: &str) -> String {
    if selector.is_empty() || is_scoped(selector, scope) {
        return selector.to_string();
    }

    for document in DOCUMENT_SELECTORS {
        if let Some(rest) = strip_compound(selector, document) {
            return format!("{}{}", scope, rest);
        }
    }

    format!("{} {}", scope, selector)
}

/// Whether `selector` starts with `scope` as a whole compound
fn is_scoped(selector: &str, scope: &str) -> bool {
    match selector.strip_prefix(scope) {
        Some(rest) => match rest.chars().next() {
            None => true,
            Some(c) => c.is_whitespace() || matches!(c, '>' | '+' | '~' | '.' | ':' | '[' | '#'),
        },
        None => false,
    }
}

/// `rest` when `selector` is exactly `compound` or `compound` followed by a combinator
fn strip_compound<'a>(selector: &'a str, compound: &str) -> Option<&'a str> {
    let lower = selector.get(..compound.len())?;
    if !lower.eq_ignore_ascii_case(compound) {
        return None;
    }
    let rest = &selector[compound.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() || matches!(c, '>' | '+' | '~') => Some(rest),
        _ => None,
    }
}

/// Lowercased at-keyword of a prelude such as `@media screen`
fn at_rule_name(prelude: &str) -> Option<String> {
    let rest = prelude.trim_start().strip_prefix('@')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    Some(name.to_ascii_lowercase())
}

/// Split on `separator` outside strings, comments, parentheses and brackets
fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < text.len() {
        let (stop, delimiter) = scan_until(bytes, pos, &[separator]);
        if delimiter.is_none() {
            break;
        }
        parts.push(&text[start..stop]);
        start = stop + 1;
        pos = stop + 1;
    }
    parts.push(&text[start..]);
    parts
}

/// Skip whitespace and comments
fn skip_trivia(bytes: &[u8], mut pos: usize) -> usize {
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if bytes[pos..].starts_with(b"/*") {
            pos = skip_comment(bytes, pos);
        } else {
            return pos;
        }
    }
}

/// Position just past the comment opening at `pos`
fn skip_comment(bytes: &[u8], pos: usize) -> usize {
    let body = pos + 2;
    bytes[body.min(bytes.len())..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|offset| body + offset + 2)
        .unwrap_or(bytes.len())
}

/// Position just past the string opening at `pos`
fn skip_string(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// First of `stops` at nesting depth zero, outside strings and comments
fn scan_until(bytes: &[u8], mut pos: usize, stops: &[u8]) -> (usize, Option<u8>) {
    let mut depth = 0usize;
    while pos < bytes.len() {
        let b = bytes[pos];
        match b {
            b'"' | b'\'' => {
                pos = skip_string(bytes, pos);
                continue;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                pos = skip_comment(bytes, pos);
                continue;
            }
            _ if depth == 0 && stops.contains(&b) => return (pos, Some(b)),
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        pos += 1;
    }
    (bytes.len(), None)
}

/// Index of the `}` closing the `{` at `open`
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = open;
    while pos < bytes.len() {
        match bytes[pos] {
            b'"' | b'\'' => {
                pos = skip_string(bytes, pos);
                continue;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                pos = skip_comment(bytes, pos);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}
