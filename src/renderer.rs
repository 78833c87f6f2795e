//! Turns a [`Template`] into a standalone HTML document.
//!
//! Everything here is pure string work. Section content and style values are
//! written into the document as-is: templates are trusted data and nothing is
//! escaped.

use crate::models::template::{SectionType, Style, Template, TemplateSection};

/// Token in a custom layout that is replaced by the rendered sections.
pub const CONTENT_PLACEHOLDER: &str = "{{content}}";

/// Image source used when a section does not carry an embedded image.
pub const PLACEHOLDER_IMAGE_SRC: &str = "/placeholder.svg";

const DEFAULT_FILENAME: &str = "email-template";

/// Renders the full document for `template`.
///
/// When the template has a non-empty layout, only the first
/// [`CONTENT_PLACEHOLDER`] is substituted; any further tokens are left in the
/// output untouched. An empty layout falls back to the default document.
pub fn render(template: &Template) -> String {
    let content = render_sections(&template.sections);

    match &template.layout {
        Some(layout) if !layout.is_empty() => layout.replacen(CONTENT_PLACEHOLDER, &content, 1),
        _ => default_document(&template.subject, &content),
    }
}

/// Renders each section in order, one fragment per line.
pub fn render_sections(sections: &[TemplateSection]) -> String {
    sections
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders one section. Unrecognized types produce an empty fragment.
pub fn render_section(section: &TemplateSection) -> String {
    let style = style_attribute(&section.style);
    let content = &section.content;

    match &section.section_type {
        SectionType::Header => format!(r#"<h1 style="{style}">{content}</h1>"#),
        SectionType::Paragraph => format!(r#"<p style="{style}">{content}</p>"#),
        SectionType::Button => {
            format!(r##"<a href="#" class="button" style="{style}">{content}</a>"##)
        }
        SectionType::Image => {
            let src = if is_embedded_image(content) {
                content.as_str()
            } else {
                PLACEHOLDER_IMAGE_SRC
            };
            format!(r#"<img src="{src}" alt="" style="{style}" />"#)
        }
        SectionType::Logo => format!(r#"<div style="{style}">{content}</div>"#),
        SectionType::ButtonGroup => format!(r#"<div style="{style}"></div>"#),
        SectionType::Other(_) => String::new(),
    }
}

/// Joins style pairs as `key:value;key:value` in insertion order.
pub fn style_attribute(style: &Style) -> String {
    style
        .iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>()
        .join(";")
}

/// File name offered when a rendered template is downloaded.
pub fn suggested_filename(template: &Template) -> String {
    let stem: String = template
        .name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect();
    let stem = stem.trim();

    if stem.is_empty() {
        format!("{DEFAULT_FILENAME}.html")
    } else {
        format!("{stem}.html")
    }
}

fn is_embedded_image(content: &str) -> bool {
    content.starts_with("data:image")
}

fn default_document(subject: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{subject}</title>
  <style>
    .button {{
      display: inline-block;
      padding: 12px 24px;
      background-color: #000000;
      color: #ffffff;
      text-decoration: none;
      border-radius: 6px;
      font-weight: 500;
      font-size: 16px;
      border: none;
    }}
  </style>
</head>
<body style="margin: 0; padding: 0; font-family: Arial, sans-serif;">
  <div class="container" style="max-width: 600px; margin: 0 auto; padding: 20px;">
{content}
  </div>
</body>
</html>
"#
    )
}
