//! Default-initialized nodes per element kind.

use crate::id_generator::IdGenerator;
use crate::node::{ItemLayout, Node, NodeKind};
use crate::presets;

pub const DEFAULT_GRID_COLUMNS: u8 = 2;
pub const DEFAULT_REPEATER_ITEMS: usize = 3;

/// Build a node of `kind` with its default tag, styles and kind attributes
///
/// Unknown kind names produce a `div` custom node with empty content. Every
/// call draws fresh ids from `ids`, including for generated descendants.
pub fn create_element(kind: &str, ids: &mut IdGenerator) -> Node {
    let id = ids.new_id();
    match kind {
        "heading" => Node::new(
            id,
            NodeKind::Heading {
                content: "New heading".to_string(),
            },
        )
        .with_styles(&[
            ("fontWeight", "700"),
            ("fontSize", "2rem"),
            ("color", "#000000"),
            ("textAlign", "center"),
        ]),
        "text" => Node::new(
            id,
            NodeKind::Text {
                content: "New text. Click to edit.".to_string(),
            },
        )
        .with_styles(&[
            ("fontSize", "1rem"),
            ("color", "#333333"),
            ("textAlign", "left"),
        ]),
        "image" => Node::new(
            id,
            NodeKind::Image {
                src: String::new(),
                alt: "Image".to_string(),
                srcset: String::new(),
                sizes: String::new(),
                width: String::new(),
                height: String::new(),
            },
        )
        .with_styles(&[("maxWidth", "100%"), ("height", "auto")]),
        "button" => Node::new(
            id,
            NodeKind::Button {
                content: "Button".to_string(),
                href: "#".to_string(),
            },
        )
        .with_classes(&["btn", "btn-primary"])
        .with_styles(&[
            ("display", "inline-block"),
            ("padding", "0.75rem 1.5rem"),
            ("backgroundColor", "#e0ac7e"),
            ("color", "#ffffff"),
            ("borderRadius", "0.5rem"),
            ("textDecoration", "none"),
        ]),
        "separator" => Node::new(id, NodeKind::Separator).with_styles(&[
            ("width", "100%"),
            ("borderTop", "1px solid #e5e5e5"),
            ("margin", "1rem 0"),
        ]),
        "container" => Node::new(id, NodeKind::Container).with_styles(&[
            ("display", "flex"),
            ("flexDirection", "column"),
            ("gap", "1rem"),
            ("padding", "1rem"),
        ]),
        "row" => Node::new(id, NodeKind::Row).with_styles(&[
            ("display", "flex"),
            ("flexDirection", "row"),
            ("gap", "1rem"),
            ("alignItems", "center"),
        ]),
        "column" => Node::new(id, NodeKind::Column).with_styles(&[
            ("display", "flex"),
            ("flexDirection", "column"),
            ("gap", "1rem"),
            ("alignItems", "stretch"),
            ("flex", "1"),
        ]),
        "grid" => {
            let template = presets::grid_template(DEFAULT_GRID_COLUMNS as u32).unwrap_or_default();
            Node::new(
                id,
                NodeKind::Grid {
                    columns: DEFAULT_GRID_COLUMNS,
                },
            )
            .with_styles(&[
                ("display", "grid"),
                ("gridTemplateColumns", template.as_str()),
                ("gap", "1rem"),
                ("padding", "1rem"),
            ])
        }
        "background" => Node::new(
            id,
            NodeKind::Background {
                background_image: String::new(),
                overlay_color: String::new(),
                overlay_opacity: 0.5,
            },
        )
        .with_classes(&["relative"])
        .with_styles(&[
            ("position", "relative"),
            ("minHeight", "200px"),
            ("backgroundColor", "#f3f4f6"),
            ("backgroundSize", "cover"),
            ("backgroundPosition", "center"),
        ]),
        "repeater" => {
            let items = (0..DEFAULT_REPEATER_ITEMS)
                .map(|_| create_repeater_item(ids))
                .collect();
            Node::new(
                id,
                NodeKind::Repeater {
                    items,
                    layout: ItemLayout::List,
                    items_per_row: 1,
                },
            )
            .with_classes(&["pd-repeater"])
            .with_styles(&[
                ("display", "flex"),
                ("flexDirection", "column"),
                ("gap", "1rem"),
            ])
        }
        "slide" => Node::new(
            id,
            NodeKind::Slide {
                background_image: String::new(),
                overlay_color: "#000000".to_string(),
                overlay_opacity: 0.3,
                slide_index: 0,
            },
        )
        .with_classes(&["pd-slide"])
        .with_styles(&[
            ("position", "relative"),
            ("minHeight", "300px"),
            ("display", "flex"),
            ("flexDirection", "column"),
            ("alignItems", "center"),
            ("justifyContent", "center"),
            ("padding", "2rem"),
            ("backgroundSize", "cover"),
            ("backgroundPosition", "center"),
        ]),
        "icon" => Node::new(
            id,
            NodeKind::Icon {
                icon_class: "pd-icon--check".to_string(),
            },
        )
        .with_classes(&["pd-icon"])
        .with_styles(&[("fontSize", "2rem"), ("color", "#e0ac7e")]),
        "picture" => Node::new(id, NodeKind::Picture),
        "source" => Node::new(
            id,
            NodeKind::Source {
                srcset: String::new(),
                sizes: String::new(),
                media: String::new(),
                mime_type: String::new(),
            },
        ),
        "raw-html" => Node::new(
            id,
            NodeKind::RawHtml {
                content: String::new(),
            },
        ),
        other => Node::new(
            id,
            NodeKind::Custom {
                name: other.to_string(),
                content: String::new(),
            },
        ),
    }
}

/// One repeater item: a flex row holding a check icon and a text label
pub fn create_repeater_item(ids: &mut IdGenerator) -> Node {
    let id = ids.new_id();
    let icon = Node::new(
        ids.new_id(),
        NodeKind::Icon {
            icon_class: "pd-icon--check".to_string(),
        },
    )
    .with_classes(&["pd-icon", "pd-icon--check"])
    .with_styles(&[("fontSize", "1.5rem"), ("color", "#e0ac7e")]);

    let label = Node::new(
        ids.new_id(),
        NodeKind::Text {
            content: "List item".to_string(),
        },
    )
    .with_tag("span")
    .with_styles(&[("fontSize", "1rem"), ("color", "#374151")]);

    Node::new(id, NodeKind::Container)
        .with_classes(&["pd-repeater__item"])
        .with_styles(&[
            ("display", "flex"),
            ("alignItems", "center"),
            ("gap", "1rem"),
            ("padding", "1rem"),
            ("backgroundColor", "#f9fafb"),
            ("borderRadius", "0.5rem"),
        ])
        .with_children(vec![icon, label])
}

/// Raw markup carried verbatim (import fallback)
pub fn create_raw_html(content: impl Into<String>, ids: &mut IdGenerator) -> Node {
    Node::new(
        ids.new_id(),
        NodeKind::RawHtml {
            content: content.into(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids() -> IdGenerator {
        IdGenerator::from_seed("f")
    }

    #[test]
    fn test_known_kinds_have_default_tags() {
        let mut ids = ids();
        let cases = [
            ("heading", "h2"),
            ("text", "p"),
            ("image", "img"),
            ("button", "a"),
            ("separator", "hr"),
            ("icon", "span"),
            ("container", "div"),
            ("grid", "div"),
            ("picture", "picture"),
        ];
        for (kind, tag) in cases {
            let node = create_element(kind, &mut ids);
            assert_eq!(node.kind_name(), kind);
            assert_eq!(node.tag, tag, "tag for {}", kind);
            assert!(node.children.is_empty());
        }
    }

    #[test]
    fn test_grid_defaults() {
        let node = create_element("grid", &mut ids());
        assert_eq!(node.kind, NodeKind::Grid { columns: 2 });
        assert_eq!(
            node.styles.get("gridTemplateColumns").map(String::as_str),
            Some("repeat(2, 1fr)")
        );
        let keys: Vec<&str> = node.styles.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["display", "gridTemplateColumns", "gap", "padding"]);
    }

    #[test]
    fn test_repeater_items_have_unique_ids() {
        let mut ids = ids();
        let node = create_element("repeater", &mut ids);
        let items = node.items().unwrap();
        assert_eq!(items.len(), DEFAULT_REPEATER_ITEMS);
        assert_eq!(items[0].children.len(), 2);

        let all = node.all_ids();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), 1 + 3 * 3);
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_unknown_kind_falls_back_to_div() {
        let node = create_element("accordion", &mut ids());
        assert_eq!(node.kind_name(), "accordion");
        assert_eq!(node.tag, "div");
        assert_eq!(node.content(), Some(""));
        assert!(node.styles.is_empty());
    }

    #[test]
    fn test_each_call_draws_fresh_ids() {
        let mut ids = ids();
        let a = create_element("text", &mut ids);
        let b = create_element("text", &mut ids);
        assert_ne!(a.id, b.id);
    }
}
