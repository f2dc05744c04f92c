//! # Element Nodes
//!
//! A [`Node`] is one addressable element of the block tree. The attributes
//! every element shares (`id`, `tag`, `classes`, `styles`, `children`,
//! `visible`, `locked`, `dataAttributes`) live on the node itself; the
//! attributes that only make sense for one element kind live in [`NodeKind`].
//!
//! On the wire a node is a flat JSON object keyed by `type`:
//!
//! ```json
//! { "id": "el-x1-4", "type": "image", "tag": "img", "src": "a.jpg", "alt": "",
//!   "classes": [], "styles": {}, "children": [], "visible": true, "locked": false }
//! ```

use crate::error::{TreeError, TreeResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Style-property key (camelCase vocabulary) to value
pub type Styles = IndexMap<String, String>;

/// Layout of a repeater's items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemLayout {
    #[default]
    List,
    Grid,
    Carousel,
}

impl ItemLayout {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "list" => Some(ItemLayout::List),
            "grid" => Some(ItemLayout::Grid),
            "carousel" => Some(ItemLayout::Carousel),
            _ => None,
        }
    }
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Container,
    Row,
    Column,
    Grid {
        columns: u8,
    },
    Background {
        background_image: String,
        overlay_color: String,
        overlay_opacity: f64,
    },
    Repeater {
        /// Parallel node list, not reachable through `children`
        items: Vec<Node>,
        layout: ItemLayout,
        items_per_row: u32,
    },
    Slide {
        background_image: String,
        overlay_color: String,
        overlay_opacity: f64,
        slide_index: u32,
    },
    Heading {
        content: String,
    },
    Text {
        content: String,
    },
    Image {
        src: String,
        alt: String,
        srcset: String,
        sizes: String,
        width: String,
        height: String,
    },
    Button {
        content: String,
        href: String,
    },
    Separator,
    Icon {
        icon_class: String,
    },
    Picture,
    Source {
        srcset: String,
        sizes: String,
        media: String,
        mime_type: String,
    },
    RawHtml {
        content: String,
    },
    /// Any kind name the engine has no special rules for
    Custom {
        name: String,
        content: String,
    },
}

impl NodeKind {
    /// The `type` string used on the wire
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Row => "row",
            NodeKind::Column => "column",
            NodeKind::Grid { .. } => "grid",
            NodeKind::Background { .. } => "background",
            NodeKind::Repeater { .. } => "repeater",
            NodeKind::Slide { .. } => "slide",
            NodeKind::Heading { .. } => "heading",
            NodeKind::Text { .. } => "text",
            NodeKind::Image { .. } => "image",
            NodeKind::Button { .. } => "button",
            NodeKind::Separator => "separator",
            NodeKind::Icon { .. } => "icon",
            NodeKind::Picture => "picture",
            NodeKind::Source { .. } => "source",
            NodeKind::RawHtml { .. } => "raw-html",
            NodeKind::Custom { name, .. } => name,
        }
    }

    /// Tag emitted when a node of this kind does not specify one
    pub fn default_tag(&self) -> &'static str {
        match self {
            NodeKind::Heading { .. } => "h2",
            NodeKind::Text { .. } => "p",
            NodeKind::Image { .. } => "img",
            NodeKind::Button { .. } => "a",
            NodeKind::Separator => "hr",
            NodeKind::Icon { .. } => "span",
            NodeKind::Picture => "picture",
            NodeKind::Source { .. } => "source",
            _ => "div",
        }
    }

    /// Kinds whose `children` are meant to be rendered
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Container
                | NodeKind::Row
                | NodeKind::Column
                | NodeKind::Grid { .. }
                | NodeKind::Background { .. }
                | NodeKind::Repeater { .. }
                | NodeKind::Slide { .. }
                | NodeKind::Picture
                | NodeKind::Custom { .. }
        )
    }
}

/// One element of the block tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRepr", into = "NodeRepr")]
pub struct Node {
    pub id: String,
    pub tag: String,
    pub classes: Vec<String>,
    pub styles: Styles,
    pub children: Vec<Node>,
    pub visible: bool,
    /// Editing hint; enforced only when the editor is configured to
    pub locked: bool,
    /// Passed through as `data-*` attributes on export
    pub data_attributes: IndexMap<String, String>,
    pub kind: NodeKind,
}

impl Node {
    /// Node with the kind's default tag and empty collections
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            tag: kind.default_tag().to_string(),
            classes: Vec::new(),
            styles: Styles::new(),
            children: Vec::new(),
            visible: true,
            locked: false,
            data_attributes: IndexMap::new(),
            kind,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_styles(mut self, styles: &[(&str, &str)]) -> Self {
        self.styles = styles
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn kind_name(&self) -> &str {
        self.kind.name()
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Text or markup content for kinds that carry it
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Heading { content }
            | NodeKind::Text { content }
            | NodeKind::Button { content, .. }
            | NodeKind::RawHtml { content }
            | NodeKind::Custom { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&Vec<Node>> {
        match &self.kind {
            NodeKind::Repeater { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn items_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::Repeater { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Set a kind-specific string attribute by its wire name
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> TreeResult<()> {
        let value = value.into();
        if name == "tag" {
            let tag = value.trim();
            if !is_valid_name(tag) {
                return Err(TreeError::InvalidValue(format!("invalid tag name `{}`", tag)));
            }
            self.tag = tag.to_string();
            return Ok(());
        }

        let slot = match (&mut self.kind, name) {
            (NodeKind::Heading { content }, "content")
            | (NodeKind::Text { content }, "content")
            | (NodeKind::Button { content, .. }, "content")
            | (NodeKind::RawHtml { content }, "content")
            | (NodeKind::Custom { content, .. }, "content") => content,
            (NodeKind::Button { href, .. }, "href") => href,
            (NodeKind::Icon { icon_class }, "iconClass") => icon_class,
            (NodeKind::Image { src, .. }, "src") => src,
            (NodeKind::Image { alt, .. }, "alt") => alt,
            (NodeKind::Image { srcset, .. }, "srcset")
            | (NodeKind::Source { srcset, .. }, "srcset") => srcset,
            (NodeKind::Image { sizes, .. }, "sizes") | (NodeKind::Source { sizes, .. }, "sizes") => {
                sizes
            }
            (NodeKind::Image { width, .. }, "width") => width,
            (NodeKind::Image { height, .. }, "height") => height,
            (NodeKind::Source { media, .. }, "media") => media,
            (NodeKind::Source { mime_type, .. }, "mimeType") => mime_type,
            _ => return Err(TreeError::UnknownAttribute(name.to_string())),
        };
        *slot = value;
        Ok(())
    }
}

/// Whether `name` can be emitted as an HTML tag or attribute name
///
/// Accepts `[A-Za-z_][A-Za-z0-9_.-]*`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Flat wire shape of a node
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRepr {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tag: String,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default, deserialize_with = "map_or_empty_list")]
    styles: Styles,
    #[serde(default)]
    children: Vec<Node>,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    locked: bool,
    #[serde(
        default,
        deserialize_with = "map_or_empty_list",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    data_attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    srcset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sizes: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    width: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overlay_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overlay_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slide_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grid_columns: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_layout: Option<ItemLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items_per_row: Option<u32>,
}

fn default_visible() -> bool {
    true
}

/// Scalar JSON value read as text
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Num(serde_json::Number),
    Bool(bool),
    Null,
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Num(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => String::new(),
        }
    }
}

/// Accepts a JSON object, or `[]` where an empty map was encoded as a list
fn map_or_empty_list<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(IndexMap<String, Scalar>),
        List(Vec<serde_json::Value>),
    }

    match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => Ok(map.into_iter().map(|(k, v)| (k, v.into_text())).collect()),
        MapOrList::List(list) if list.is_empty() => Ok(IndexMap::new()),
        MapOrList::List(_) => Err(serde::de::Error::custom("expected an object")),
    }
}

/// Accepts a string or a number
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

impl From<NodeRepr> for Node {
    fn from(repr: NodeRepr) -> Self {
        let text = |v: Option<String>| v.unwrap_or_default();
        let kind = match repr.kind.as_str() {
            "container" => NodeKind::Container,
            "row" => NodeKind::Row,
            "column" => NodeKind::Column,
            "grid" => NodeKind::Grid {
                columns: repr.grid_columns.unwrap_or(2),
            },
            "background" => NodeKind::Background {
                background_image: text(repr.background_image),
                overlay_color: text(repr.overlay_color),
                overlay_opacity: repr.overlay_opacity.unwrap_or(0.5),
            },
            "repeater" => NodeKind::Repeater {
                items: repr.items.unwrap_or_default(),
                layout: repr.item_layout.unwrap_or_default(),
                items_per_row: repr.items_per_row.unwrap_or(1),
            },
            "slide" => NodeKind::Slide {
                background_image: text(repr.background_image),
                overlay_color: text(repr.overlay_color),
                overlay_opacity: repr.overlay_opacity.unwrap_or(0.3),
                slide_index: repr.slide_index.unwrap_or(0),
            },
            "heading" => NodeKind::Heading {
                content: text(repr.content),
            },
            "text" => NodeKind::Text {
                content: text(repr.content),
            },
            "image" => NodeKind::Image {
                src: text(repr.src),
                alt: text(repr.alt),
                srcset: text(repr.srcset),
                sizes: text(repr.sizes),
                width: text(repr.width),
                height: text(repr.height),
            },
            "button" => NodeKind::Button {
                content: text(repr.content),
                href: text(repr.href),
            },
            "separator" => NodeKind::Separator,
            "icon" => NodeKind::Icon {
                icon_class: text(repr.icon_class),
            },
            "picture" => NodeKind::Picture,
            "source" => NodeKind::Source {
                srcset: text(repr.srcset),
                sizes: text(repr.sizes),
                media: text(repr.media),
                mime_type: text(repr.mime_type),
            },
            "raw-html" => NodeKind::RawHtml {
                content: text(repr.content),
            },
            _ => NodeKind::Custom {
                name: repr.kind,
                content: text(repr.content),
            },
        };

        let tag = if repr.tag.is_empty() {
            kind.default_tag().to_string()
        } else {
            repr.tag
        };

        Node {
            id: repr.id,
            tag,
            classes: repr.classes,
            styles: repr.styles,
            children: repr.children,
            visible: repr.visible,
            locked: repr.locked,
            data_attributes: repr.data_attributes,
            kind,
        }
    }
}

impl From<Node> for NodeRepr {
    fn from(node: Node) -> Self {
        let mut repr = NodeRepr {
            id: node.id,
            kind: node.kind.name().to_string(),
            tag: node.tag,
            classes: node.classes,
            styles: node.styles,
            children: node.children,
            visible: node.visible,
            locked: node.locked,
            data_attributes: node.data_attributes,
            content: None,
            src: None,
            alt: None,
            srcset: None,
            sizes: None,
            width: None,
            height: None,
            media: None,
            mime_type: None,
            href: None,
            icon_class: None,
            background_image: None,
            overlay_color: None,
            overlay_opacity: None,
            slide_index: None,
            grid_columns: None,
            items: None,
            item_layout: None,
            items_per_row: None,
        };

        match node.kind {
            NodeKind::Container
            | NodeKind::Row
            | NodeKind::Column
            | NodeKind::Separator
            | NodeKind::Picture => {}
            NodeKind::Grid { columns } => repr.grid_columns = Some(columns),
            NodeKind::Background {
                background_image,
                overlay_color,
                overlay_opacity,
            } => {
                repr.background_image = Some(background_image);
                repr.overlay_color = Some(overlay_color);
                repr.overlay_opacity = Some(overlay_opacity);
            }
            NodeKind::Repeater {
                items,
                layout,
                items_per_row,
            } => {
                repr.items = Some(items);
                repr.item_layout = Some(layout);
                repr.items_per_row = Some(items_per_row);
            }
            NodeKind::Slide {
                background_image,
                overlay_color,
                overlay_opacity,
                slide_index,
            } => {
                repr.background_image = Some(background_image);
                repr.overlay_color = Some(overlay_color);
                repr.overlay_opacity = Some(overlay_opacity);
                repr.slide_index = Some(slide_index);
            }
            NodeKind::Heading { content }
            | NodeKind::Text { content }
            | NodeKind::RawHtml { content } => repr.content = Some(content),
            NodeKind::Custom { content, .. } => {
                repr.content = Some(content).filter(|c| !c.is_empty())
            }
            NodeKind::Image {
                src,
                alt,
                srcset,
                sizes,
                width,
                height,
            } => {
                let optional = |v: String| Some(v).filter(|v| !v.is_empty());
                repr.src = Some(src);
                repr.alt = Some(alt);
                repr.srcset = optional(srcset);
                repr.sizes = optional(sizes);
                repr.width = optional(width);
                repr.height = optional(height);
            }
            NodeKind::Button { content, href } => {
                repr.content = Some(content);
                repr.href = Some(href);
            }
            NodeKind::Icon { icon_class } => repr.icon_class = Some(icon_class),
            NodeKind::Source {
                srcset,
                sizes,
                media,
                mime_type,
            } => {
                let optional = |v: String| Some(v).filter(|v| !v.is_empty());
                repr.srcset = Some(srcset);
                repr.sizes = optional(sizes);
                repr.media = optional(media);
                repr.mime_type = optional(mime_type);
            }
        }

        repr
    }
}
