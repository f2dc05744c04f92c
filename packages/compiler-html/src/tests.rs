use crate::{compile_node_to_html, compile_to_html, ExportOptions};
use blockforge_document::{create_element, Document, IdGenerator, Node, NodeKind, Variable};

fn document() -> (Document, IdGenerator) {
    let mut ids = IdGenerator::from_seed("t");
    let doc = Document::new(&mut ids);
    (doc, ids)
}

fn with_children(kinds: &[&str]) -> Document {
    let (mut doc, mut ids) = document();
    for kind in kinds {
        doc.root.children.push(create_element(kind, &mut ids));
    }
    doc
}

fn compact() -> ExportOptions {
    ExportOptions {
        pretty: false,
        ..Default::default()
    }
}

#[test]
fn test_compile_heading() {
    let doc = with_children(&["heading"]);
    let html = compile_to_html(&doc, &compact());

    assert_eq!(
        html,
        "<h2 style=\"font-weight: 700; font-size: 2rem; color: #000000; text-align: center\">New heading</h2>"
    );
}

#[test]
fn test_root_wrapper_is_omitted_by_default() {
    let doc = with_children(&["text"]);
    let html = compile_to_html(&doc, &compact());
    assert!(!html.contains("pd-block"));

    let html = compile_to_html(
        &doc,
        &ExportOptions {
            include_root: true,
            ..compact()
        },
    );
    assert!(html.starts_with("<div class=\"pd-block grid-row\""));
    assert!(html.ends_with("</div>"));
}

#[test]
fn test_empty_document() {
    let (doc, _) = document();
    assert_eq!(compile_to_html(&doc, &ExportOptions::default()), "");
}

#[test]
fn test_compile_nested_elements() {
    let (mut doc, mut ids) = document();
    let mut row = create_element("row", &mut ids);
    row.children.push(create_element("heading", &mut ids));
    row.children.push(create_element("separator", &mut ids));
    doc.root.children.push(row);

    let html = compile_to_html(
        &doc,
        &ExportOptions {
            inline_styles: false,
            ..Default::default()
        },
    );

    assert_eq!(html, "<div>\n  <h2>New heading</h2>\n  <hr>\n</div>\n");
}

#[test]
fn test_hidden_subtree_is_skipped() {
    let (mut doc, mut ids) = document();
    let mut container = create_element("container", &mut ids);
    container.visible = false;
    let mut secret = create_element("text", &mut ids);
    secret.set_attribute("content", "secret words").unwrap();
    container.children.push(secret);
    doc.root.children.push(container);
    doc.root.children.push(create_element("heading", &mut ids));

    let html = compile_to_html(&doc, &ExportOptions::default());
    assert!(!html.contains("secret words"));
    assert!(!html.contains("<div"));
    assert!(html.contains("New heading"));
}

#[test]
fn test_inline_styles_disabled() {
    let (mut doc, mut ids) = document();
    let mut text = create_element("text", &mut ids);
    text.set_attribute("content", "<span style=\"color: red\" onclick=\"x()\">hot</span>")
        .unwrap();
    doc.root.children.push(text);
    for kind in ["button", "image", "grid", "repeater", "icon"] {
        doc.root.children.push(create_element(kind, &mut ids));
    }
    doc.root.children.push(Node::new(
        "raw",
        NodeKind::RawHtml {
            content: "<div style=\"color:red\" title='a'>x</div><p STYLE='margin: 0'>y</p>".to_string(),
        },
    ));

    let html = compile_to_html(
        &doc,
        &ExportOptions {
            inline_styles: false,
            ..Default::default()
        },
    );
    assert!(!html.contains("style="));
    assert!(!html.contains("onclick"));
    assert!(html.contains("<span>hot</span>"));
    assert!(html.contains("<div title='a'>x</div><p>y</p>"));
}

#[test]
fn test_text_escaping_and_safe_tags() {
    let (mut doc, mut ids) = document();
    let mut plain = create_element("text", &mut ids);
    plain.set_attribute("content", "Fish & \"chips\"").unwrap();
    let mut rich = create_element("text", &mut ids);
    rich.set_attribute(
        "content",
        "<strong>Bold</strong><script>alert(1)</script><!-- note --><div>x</div>",
    )
    .unwrap();
    doc.root.children.push(plain);
    doc.root.children.push(rich);

    let html = compile_to_html(&doc, &ExportOptions { inline_styles: false, ..compact() });

    assert!(html.contains("<p>Fish &amp; &quot;chips&quot;</p>"));
    assert!(html.contains("<p><strong>Bold</strong>alert(1)x</p>"));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("note"));
}

#[test]
fn test_raw_html_is_verbatim() {
    let (mut doc, _) = document();
    doc.root.children.push(Node::new(
        "raw",
        NodeKind::RawHtml {
            content: "<table><tr><td>1</td></tr></table>".to_string(),
        },
    ));

    let html = compile_to_html(&doc, &compact());
    assert_eq!(html, "<table><tr><td>1</td></tr></table>");
}

#[test]
fn test_compile_image() {
    let (mut doc, mut ids) = document();
    let mut image = create_element("image", &mut ids);
    image.set_attribute("src", "/a b.jpg").unwrap();
    image.set_attribute("width", "640").unwrap();
    image.styles.clear();
    doc.root.children.push(image);

    let html = compile_to_html(&doc, &compact());
    assert_eq!(
        html,
        "<img src=\"/a b.jpg\" alt=\"Image\" width=\"640\" loading=\"lazy\">"
    );
}

#[test]
fn test_compile_picture_sources() {
    let (mut doc, mut ids) = document();
    let mut picture = create_element("picture", &mut ids);
    let mut webp = create_element("source", &mut ids);
    webp.set_attribute("srcset", "a.webp").unwrap();
    webp.set_attribute("mimeType", "image/webp").unwrap();
    picture.children.push(webp);
    // a source without srcset is dropped
    picture.children.push(create_element("source", &mut ids));
    let mut image = create_element("image", &mut ids);
    image.styles.clear();
    image.set_attribute("src", "a.jpg").unwrap();
    picture.children.push(image);
    doc.root.children.push(picture);

    let html = compile_to_html(&doc, &compact());
    assert_eq!(
        html,
        "<picture><source srcset=\"a.webp\" type=\"image/webp\"><img src=\"a.jpg\" alt=\"Image\" loading=\"lazy\"></picture>"
    );
}

#[test]
fn test_compile_button_and_icon() {
    let (mut doc, mut ids) = document();
    let mut button = create_element("button", &mut ids);
    button.set_attribute("href", "/buy?a=1&b=2").unwrap();
    button.set_attribute("content", "Buy <now>").unwrap();
    doc.root.children.push(button);
    doc.root.children.push(create_element("icon", &mut ids));

    let html = compile_to_html(&doc, &ExportOptions { inline_styles: false, ..compact() });

    assert!(html.contains("<a href=\"/buy?a=1&amp;b=2\" class=\"btn btn-primary\">Buy &lt;now&gt;</a>"));
    assert!(html.contains("<span class=\"pd-icon pd-icon--check\"></span>"));
}

#[test]
fn test_repeater_items_follow_children() {
    let (mut doc, mut ids) = document();
    let mut repeater = create_element("repeater", &mut ids);
    let mut heading = create_element("heading", &mut ids);
    heading.set_attribute("content", "Features").unwrap();
    repeater.children.push(heading);
    doc.root.children.push(repeater);

    let html = compile_to_html(&doc, &ExportOptions { inline_styles: false, ..compact() });

    let heading_at = html.find("Features").unwrap();
    let item_at = html.find("pd-repeater__item").unwrap();
    assert!(heading_at < item_at);
    assert_eq!(html.matches("List item").count(), 3);
}

#[test]
fn test_data_attributes() {
    let (mut doc, mut ids) = document();
    let mut text = create_element("text", &mut ids);
    text.styles.clear();
    text.classes.push("lead".to_string());
    text.data_attributes
        .insert("track".to_string(), "hero \"cta\"".to_string());
    doc.root.children.push(text);

    let html = compile_to_html(&doc, &compact());
    assert_eq!(
        html,
        "<p class=\"lead\" data-track=\"hero &quot;cta&quot;\">New text. Click to edit.</p>"
    );
}

#[test]
fn test_unusable_names_are_not_emitted() {
    let (mut doc, mut ids) = document();
    let mut text = create_element("text", &mut ids);
    text.styles.clear();
    text.data_attributes
        .insert("x style".to_string(), "color:red".to_string());
    text.data_attributes
        .insert("track".to_string(), "cta".to_string());
    doc.root.children.push(text);
    let mut container = create_element("container", &mut ids);
    container.styles.clear();
    container.tag = "div onclick=alert(1)".to_string();
    doc.root.children.push(container);

    let html = compile_to_html(&doc, &ExportOptions { inline_styles: false, ..compact() });

    assert_eq!(
        html,
        "<p data-track=\"cta\">New text. Click to edit.</p><div></div>"
    );
}

#[test]
fn test_unmapped_style_keys_pass_through() {
    let (mut doc, mut ids) = document();
    let mut text = create_element("text", &mut ids);
    text.styles.clear();
    text.styles.insert("--accent".to_string(), "red".to_string());
    text.styles.insert("color".to_string(), String::new());
    doc.root.children.push(text);

    let html = compile_to_html(&doc, &compact());
    assert!(html.contains("style=\"--accent: red\""));
}

#[test]
fn test_variable_substitution() {
    let (mut doc, mut ids) = document();
    let mut heading = create_element("heading", &mut ids);
    heading.styles.clear();
    heading
        .set_attribute("content", "{{title}} for {{price}} {{missing}}")
        .unwrap();
    doc.root.children.push(heading);
    doc.variables.push(Variable::new("title").with_default("Widget"));
    doc.variables.push(Variable::new("price").with_default(10));

    let mut options = compact();
    let html = compile_to_html(&doc, &options);
    assert_eq!(html, "<h2>Widget for 10 {{missing}}</h2>");

    options
        .variable_values
        .insert("title".to_string(), "<Gadget>".to_string());
    let html = compile_to_html(&doc, &options);
    assert_eq!(html, "<h2>&lt;Gadget&gt; for 10 {{missing}}</h2>");
}

#[test]
fn test_minify() {
    let (mut doc, mut ids) = document();
    let mut container = create_element("container", &mut ids);
    let mut text = create_element("text", &mut ids);
    text.set_attribute("content", "two  spaces").unwrap();
    container.children.push(text);
    container.children.push(Node::new(
        "raw",
        NodeKind::RawHtml {
            content: "<ul>\n  <li>a</li>\n</ul>\n".to_string(),
        },
    ));
    doc.root.children.push(container);

    let html = compile_to_html(
        &doc,
        &ExportOptions {
            minify: true,
            inline_styles: false,
            ..Default::default()
        },
    );
    assert_eq!(html, "<div><p>two  spaces</p><ul><li>a</li></ul></div>");
}

#[test]
fn test_minify_keeps_space_between_inline_tags() {
    let (mut doc, mut ids) = document();
    let mut text = create_element("text", &mut ids);
    text.set_attribute("content", "<strong>a</strong> <em>b</em>").unwrap();
    doc.root.children.push(text);
    doc.root.children.push(create_element("separator", &mut ids));

    let html = compile_to_html(
        &doc,
        &ExportOptions {
            minify: true,
            inline_styles: false,
            ..Default::default()
        },
    );
    assert_eq!(html, "<p><strong>a</strong> <em>b</em></p><hr>");
}

#[test]
fn test_export_is_idempotent() {
    let doc = with_children(&["heading", "text", "image", "button", "repeater", "grid"]);
    let options = ExportOptions::default();
    assert_eq!(compile_to_html(&doc, &options), compile_to_html(&doc, &options));
}

#[test]
fn test_compile_single_node() {
    let mut ids = IdGenerator::from_seed("n");
    let mut separator = create_element("separator", &mut ids);
    separator.styles.clear();
    assert_eq!(compile_node_to_html(&separator, &compact()), "<hr>");
}

#[test]
fn test_options_from_json() {
    let options: ExportOptions =
        serde_json::from_str(r#"{"inlineStyles": false, "variableValues": {"a": "b"}}"#).unwrap();
    assert!(!options.inline_styles);
    assert!(options.pretty);
    assert_eq!(options.variable_values["a"], "b");
}
