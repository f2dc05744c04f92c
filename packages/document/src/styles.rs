//! Style-property vocabulary: internal camelCase keys to CSS properties.

use crate::node::Styles;

/// Read-only lookup table from style key to CSS property name
#[derive(Debug, Clone, Copy)]
pub struct StyleMap {
    entries: &'static [(&'static str, &'static str)],
}

impl StyleMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// The built-in table
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_STYLE_MAP)
    }

    /// CSS property for `key`; keys missing from the table pass through unchanged
    pub fn css_property<'a>(&self, key: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, css)| *css)
            .unwrap_or(key)
    }

    /// `property: value` pairs in insertion order, empty values dropped
    pub fn declarations<'a>(&self, styles: &'a Styles) -> Vec<(&'a str, &'a str)> {
        styles
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (self.css_property(key), value.as_str()))
            .collect()
    }

    /// Inline `style` attribute value (`"; "`-joined)
    pub fn inline_style(&self, styles: &Styles) -> String {
        self.declarations(styles)
            .into_iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_STYLE_MAP: &[(&str, &str)] = &[
    // Display & flex
    ("display", "display"),
    ("flex", "flex"),
    ("flexDirection", "flex-direction"),
    ("flexWrap", "flex-wrap"),
    ("flexGrow", "flex-grow"),
    ("flexShrink", "flex-shrink"),
    ("alignItems", "align-items"),
    ("alignSelf", "align-self"),
    ("justifyContent", "justify-content"),
    ("gap", "gap"),
    ("rowGap", "row-gap"),
    ("columnGap", "column-gap"),
    // Grid
    ("gridTemplateColumns", "grid-template-columns"),
    ("gridTemplateRows", "grid-template-rows"),
    ("gridColumn", "grid-column"),
    ("gridRow", "grid-row"),
    ("gridGap", "grid-gap"),
    // Spacing
    ("padding", "padding"),
    ("paddingTop", "padding-top"),
    ("paddingBottom", "padding-bottom"),
    ("paddingLeft", "padding-left"),
    ("paddingRight", "padding-right"),
    ("margin", "margin"),
    ("marginTop", "margin-top"),
    ("marginBottom", "margin-bottom"),
    ("marginLeft", "margin-left"),
    ("marginRight", "margin-right"),
    // Sizing
    ("width", "width"),
    ("height", "height"),
    ("maxWidth", "max-width"),
    ("maxHeight", "max-height"),
    ("minWidth", "min-width"),
    ("minHeight", "min-height"),
    // Typography
    ("fontFamily", "font-family"),
    ("fontSize", "font-size"),
    ("fontWeight", "font-weight"),
    ("fontStyle", "font-style"),
    ("lineHeight", "line-height"),
    ("letterSpacing", "letter-spacing"),
    ("color", "color"),
    ("textAlign", "text-align"),
    ("textDecoration", "text-decoration"),
    ("textTransform", "text-transform"),
    ("listStyle", "list-style"),
    // Background
    ("backgroundColor", "background-color"),
    ("backgroundImage", "background-image"),
    ("backgroundSize", "background-size"),
    ("backgroundPosition", "background-position"),
    ("backgroundRepeat", "background-repeat"),
    // Border
    ("border", "border"),
    ("borderTop", "border-top"),
    ("borderBottom", "border-bottom"),
    ("borderLeft", "border-left"),
    ("borderRight", "border-right"),
    ("borderRadius", "border-radius"),
    ("borderColor", "border-color"),
    ("borderWidth", "border-width"),
    ("borderStyle", "border-style"),
    // Image
    ("objectFit", "object-fit"),
    ("objectPosition", "object-position"),
    // Effects
    ("opacity", "opacity"),
    ("boxShadow", "box-shadow"),
    ("overflow", "overflow"),
    ("transform", "transform"),
    ("filter", "filter"),
    // Position
    ("position", "position"),
    ("top", "top"),
    ("bottom", "bottom"),
    ("left", "left"),
    ("right", "right"),
    ("zIndex", "z-index"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(pairs: &[(&str, &str)]) -> Styles {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_known_keys_are_mapped() {
        let map = StyleMap::builtin();
        assert_eq!(map.css_property("flexDirection"), "flex-direction");
        assert_eq!(map.css_property("zIndex"), "z-index");
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let map = StyleMap::builtin();
        assert_eq!(map.css_property("--brand"), "--brand");
        assert_eq!(map.css_property("scrollSnapType"), "scrollSnapType");
    }

    #[test]
    fn test_inline_style_drops_empty_values() {
        let map = StyleMap::builtin();
        let inline = map.inline_style(&styles(&[
            ("display", "flex"),
            ("color", ""),
            ("fontSize", "2rem"),
        ]));
        assert_eq!(inline, "display: flex; font-size: 2rem");
    }

    #[test]
    fn test_injected_table() {
        static TABLE: &[(&str, &str)] = &[("accent", "color")];
        let map = StyleMap::new(TABLE);
        assert_eq!(map.inline_style(&styles(&[("accent", "red")])), "color: red");
        assert_eq!(map.css_property("fontSize"), "fontSize");
    }
}
