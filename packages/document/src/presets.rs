//! Static style presets offered by the property panel.

pub type StylePreset = &'static [(&'static str, &'static str)];

pub const MAX_GRID_COLUMNS: u8 = 6;

pub fn button_variant(name: &str) -> Option<StylePreset> {
    let preset: StylePreset = match name {
        "primary" => &[
            ("backgroundColor", "#e0ac7e"),
            ("color", "#ffffff"),
            ("border", "none"),
            ("fontWeight", "600"),
        ],
        "secondary" => &[
            ("backgroundColor", "#374151"),
            ("color", "#ffffff"),
            ("border", "none"),
            ("fontWeight", "500"),
        ],
        "outline" => &[
            ("backgroundColor", "transparent"),
            ("color", "#e0ac7e"),
            ("border", "2px solid #e0ac7e"),
            ("fontWeight", "500"),
        ],
        "ghost" => &[
            ("backgroundColor", "transparent"),
            ("color", "#9ca3af"),
            ("border", "none"),
            ("fontWeight", "500"),
        ],
        "danger" => &[
            ("backgroundColor", "#dc2626"),
            ("color", "#ffffff"),
            ("border", "none"),
            ("fontWeight", "600"),
        ],
        "success" => &[
            ("backgroundColor", "#059669"),
            ("color", "#ffffff"),
            ("border", "none"),
            ("fontWeight", "600"),
        ],
        _ => return None,
    };
    Some(preset)
}

pub fn button_size(name: &str) -> Option<StylePreset> {
    let preset: StylePreset = match name {
        "sm" => &[("padding", "0.5rem 1rem"), ("fontSize", "0.875rem")],
        "md" => &[("padding", "0.75rem 1.5rem"), ("fontSize", "1rem")],
        "lg" => &[("padding", "1rem 2rem"), ("fontSize", "1.125rem")],
        "xl" => &[("padding", "1.25rem 2.5rem"), ("fontSize", "1.25rem")],
        _ => return None,
    };
    Some(preset)
}

/// Font size for an icon size name
pub fn icon_size(name: &str) -> Option<&'static str> {
    match name {
        "sm" => Some("1rem"),
        "md" => Some("1.5rem"),
        "lg" => Some("2rem"),
        "xl" => Some("2.5rem"),
        "2xl" => Some("3rem"),
        "3xl" => Some("4rem"),
        _ => None,
    }
}

/// `gridTemplateColumns` value for 1..=6 equal columns
pub fn grid_template(columns: u32) -> Option<String> {
    if (1..=MAX_GRID_COLUMNS as u32).contains(&columns) {
        Some(format!("repeat({}, 1fr)", columns))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_presets() {
        assert!(button_variant("neon").is_none());
        assert!(button_size("xxl").is_none());
        assert!(icon_size("huge").is_none());
    }

    #[test]
    fn test_grid_template_bounds() {
        assert_eq!(grid_template(3).as_deref(), Some("repeat(3, 1fr)"));
        assert!(grid_template(0).is_none());
        assert!(grid_template(7).is_none());
    }
}
