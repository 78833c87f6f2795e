use email_template_service::{
    models::template::{SectionType, Template, TemplateSection},
    renderer::{
        PLACEHOLDER_IMAGE_SRC, render, render_section, style_attribute, suggested_filename,
    },
};

fn template_with(sections: Vec<TemplateSection>) -> Template {
    Template {
        id: "1".to_string(),
        name: "Test".to_string(),
        subject: "Hi".to_string(),
        sections,
        layout: None,
    }
}

/// Test: A header renders inside the default container with the subject as title
#[test]
fn test_header_renders_inside_default_shell() {
    let template = template_with(vec![
        TemplateSection::new(SectionType::Header, "Welcome").with_style("color", "#000"),
    ]);

    let html = render(&template);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.trim_end().ends_with("</html>"));
    assert!(html.contains("<title>Hi</title>"));

    let container = html
        .find(r#"<div class="container""#)
        .expect("default container should be present");
    let header = html
        .find(r#"<h1 style="color:#000">Welcome</h1>"#)
        .expect("header fragment should be present");
    let close = html.rfind("</div>").expect("container should be closed");

    assert!(container < header && header < close);
}

/// Test: An empty template still produces a full document
#[test]
fn test_empty_sections_render_bare_shell() {
    let mut template = template_with(Vec::new());
    template.subject = "Nothing here".to_string();

    let html = render(&template);

    assert!(html.contains("<title>Nothing here</title>"));
    assert!(html.contains("<body"));
    assert!(!html.contains("<h1"));
    assert!(!html.contains("<p "));
    assert!(!html.contains("<img"));
}

/// Test: Fragments follow the order of the sections
#[test]
fn test_sections_render_in_input_order() {
    let template = template_with(vec![
        TemplateSection::new(SectionType::Paragraph, "first"),
        TemplateSection::new(SectionType::Button, "second"),
        TemplateSection::new(SectionType::Header, "third"),
    ]);

    let html = render(&template);

    let first = html.find("<p ").expect("paragraph missing");
    let second = html.find("<a ").expect("button missing");
    let third = html.find("<h1 ").expect("header missing");

    assert!(first < second && second < third);
}

/// Test: Rendering is deterministic
#[test]
fn test_render_is_repeatable() {
    let template = template_with(vec![
        TemplateSection::new(SectionType::Header, "Title")
            .with_style("fontSize", "42px")
            .with_style("color", "#111"),
        TemplateSection::new(SectionType::Image, "https://example.com/a.png"),
    ]);

    assert_eq!(render(&template), render(&template));
}

/// Test: Unknown section types produce nothing and do not panic
#[test]
fn test_unknown_section_type_renders_empty() {
    let section = TemplateSection::new(SectionType::from("unknown".to_string()), "ignored");

    assert_eq!(render_section(&section), "");

    let html = render(&template_with(vec![section]));
    assert!(!html.contains("ignored"));
}

/// Test: Only the first content placeholder in a custom layout is replaced
#[test]
fn test_custom_layout_replaces_first_placeholder_only() {
    let mut template = template_with(vec![TemplateSection::new(SectionType::Paragraph, "Body")]);
    template.layout = Some("<x>{{content}}{{content}}</x>".to_string());

    let html = render(&template);

    assert_eq!(html, r#"<x><p style="">Body</p>{{content}}</x>"#);
    assert_eq!(html.matches("{{content}}").count(), 1);
}

/// Test: Style pairs are joined in insertion order
#[test]
fn test_style_attribute_keeps_insertion_order() {
    let section = TemplateSection::new(SectionType::Paragraph, "x")
        .with_style("z-index", "1")
        .with_style("color", "red")
        .with_style("margin", "0");

    assert_eq!(style_attribute(&section.style), "z-index:1;color:red;margin:0");
    assert_eq!(
        render_section(&section),
        r#"<p style="z-index:1;color:red;margin:0">x</p>"#
    );
}

/// Test: A section without style emits an empty style attribute
#[test]
fn test_missing_style_is_empty_attribute() -> anyhow::Result<()> {
    let section: TemplateSection =
        serde_json::from_str(r#"{"type":"header","content":"Hello"}"#)?;
    let null_style: TemplateSection =
        serde_json::from_str(r#"{"type":"header","content":"Hello","style":null}"#)?;

    assert_eq!(render_section(&section), r#"<h1 style="">Hello</h1>"#);
    assert_eq!(render_section(&section), render_section(&null_style));

    Ok(())
}

/// Test: Each section type maps to its markup
#[test]
fn test_section_type_markup() {
    let button = TemplateSection::new(SectionType::Button, "Go").with_style("color", "#fff");
    let logo = TemplateSection::new(SectionType::Logo, "<b>ACME</b>");
    let group = TemplateSection::new(SectionType::ButtonGroup, "ignored")
        .with_style("display", "flex");

    assert_eq!(
        render_section(&button),
        r##"<a href="#" class="button" style="color:#fff">Go</a>"##
    );
    assert_eq!(render_section(&logo), r#"<div style=""><b>ACME</b></div>"#);
    assert_eq!(render_section(&group), r#"<div style="display:flex"></div>"#);
}

/// Test: Only embedded images are used as the image source
#[test]
fn test_image_source_uses_data_uri_or_placeholder() {
    let embedded = TemplateSection::new(SectionType::Image, "data:image/png;base64,AAAA")
        .with_style("width", "100%");
    let remote = TemplateSection::new(SectionType::Image, "https://cdn.example.com/x.png");

    assert_eq!(
        render_section(&embedded),
        r#"<img src="data:image/png;base64,AAAA" alt="" style="width:100%" />"#
    );
    assert_eq!(
        render_section(&remote),
        format!(r#"<img src="{}" alt="" style="" />"#, PLACEHOLDER_IMAGE_SRC)
    );
}

/// Test: Content is embedded without escaping
#[test]
fn test_content_is_not_escaped() {
    let section = TemplateSection::new(SectionType::Paragraph, "<em>Hi</em> & bye");

    assert_eq!(render_section(&section), r#"<p style=""><em>Hi</em> & bye</p>"#);
}

/// Test: Download file names come from the template name
#[test]
fn test_suggested_filename() {
    let mut template = template_with(Vec::new());
    assert_eq!(suggested_filename(&template), "Test.html");

    template.name = "Spring \"Sale\" / 2025".to_string();
    assert_eq!(suggested_filename(&template), "Spring Sale  2025.html");

    template.name = "   ".to_string();
    assert_eq!(suggested_filename(&template), "email-template.html");
}

/// Test: An empty layout falls back to the default document
#[test]
fn test_empty_layout_uses_default_shell() {
    let mut template = template_with(vec![TemplateSection::new(SectionType::Paragraph, "Body")]);
    template.layout = Some(String::new());

    let html = render(&template);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Hi</title>"));
    assert!(html.contains(r#"<p style="">Body</p>"#));
    assert_eq!(html, render(&template_with(template.sections.clone())));
}

/// Test: The default document styles the button class used by button sections
#[test]
fn test_default_shell_defines_button_class() {
    let template = template_with(vec![TemplateSection::new(SectionType::Button, "Go")]);

    let html = render(&template);

    let stylesheet = html.find(".button {").expect("button rule should be present");
    let head_end = html.find("</head>").expect("head should be closed");
    let button = html.find(r#"class="button""#).expect("button markup missing");

    assert!(stylesheet < head_end && head_end < button);
}
