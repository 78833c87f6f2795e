use std::fmt::{Display, Formatter, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Id carried by a template that has never been saved.
pub const NEW_TEMPLATE_ID: &str = "new";

/// CSS property name to value, kept in insertion order.
pub type Style = IndexMap<String, String>;

/// The closed set of section kinds a template can be built from.
///
/// `Other` holds whatever unrecognized string was loaded so that foreign
/// records round-trip; it is never accepted on save and renders to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    Header,
    Paragraph,
    Button,
    Image,
    Logo,
    ButtonGroup,
    Other(String),
}

impl SectionType {
    pub fn as_str(&self) -> &str {
        match self {
            SectionType::Header => "header",
            SectionType::Paragraph => "paragraph",
            SectionType::Button => "button",
            SectionType::Image => "image",
            SectionType::Logo => "logo",
            SectionType::ButtonGroup => "button-group",
            SectionType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SectionType::Other(_))
    }
}

impl From<String> for SectionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "header" => SectionType::Header,
            "paragraph" => SectionType::Paragraph,
            "button" => SectionType::Button,
            "image" => SectionType::Image,
            "logo" => SectionType::Logo,
            "button-group" => SectionType::ButtonGroup,
            _ => SectionType::Other(value),
        }
    }
}

impl From<SectionType> for String {
    fn from(value: SectionType) -> Self {
        value.as_str().to_string()
    }
}

impl Display for SectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    #[serde(rename = "type")]
    pub section_type: SectionType,

    #[serde(default)]
    pub content: String,

    #[serde(default, deserialize_with = "deserialize_style")]
    pub style: Style,
}

impl TemplateSection {
    pub fn new(section_type: SectionType, content: impl Into<String>) -> Self {
        Self {
            section_type,
            content: content.into(),
            style: Style::new(),
        }
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }
}

// `"style": null` is treated the same as a missing style.
fn deserialize_style<'de, D>(deserializer: D) -> std::result::Result<Style, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Style>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub sections: Vec<TemplateSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl Template {
    /// An empty, unsaved template.
    pub fn draft() -> Self {
        Self {
            id: NEW_TEMPLATE_ID.to_string(),
            name: String::new(),
            subject: String::new(),
            sections: Vec::new(),
            layout: None,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_empty() || self.id == NEW_TEMPLATE_ID
    }
}

/// Starter templates offered on an empty store.
pub fn seed_templates() -> Vec<Template> {
    vec![
        Template {
            id: NEW_TEMPLATE_ID.to_string(),
            name: "Modern Welcome".to_string(),
            subject: "Welcome to Our Platform".to_string(),
            sections: vec![
                TemplateSection::new(SectionType::Header, "Email has never been easier")
                    .with_style("fontSize", "42px")
                    .with_style("fontWeight", "bold")
                    .with_style("textAlign", "left")
                    .with_style("marginBottom", "24px")
                    .with_style("color", "#000")
                    .with_style("lineHeight", "1.2"),
                TemplateSection::new(
                    SectionType::Paragraph,
                    "Create beautiful and sophisticated emails in minutes. No coding required, and minimal setup. The way email should be.",
                )
                .with_style("textAlign", "left")
                .with_style("color", "#666")
                .with_style("fontSize", "18px")
                .with_style("lineHeight", "1.6")
                .with_style("marginBottom", "32px")
                .with_style("maxWidth", "600px"),
                TemplateSection::new(SectionType::Button, "Get started")
                    .with_style("backgroundColor", "#000000")
                    .with_style("color", "#ffffff")
                    .with_style("padding", "12px 24px")
                    .with_style("borderRadius", "6px")
                    .with_style("border", "none")
                    .with_style("cursor", "pointer")
                    .with_style("fontWeight", "500")
                    .with_style("fontSize", "16px")
                    .with_style("textDecoration", "none")
                    .with_style("display", "inline-block")
                    .with_style("marginBottom", "40px"),
                TemplateSection::new(SectionType::Image, "/placeholder.svg")
                    .with_style("width", "100%")
                    .with_style("maxWidth", "600px")
                    .with_style("height", "auto")
                    .with_style("display", "block")
                    .with_style("margin", "0")
                    .with_style("borderRadius", "8px")
                    .with_style("backgroundColor", "#f5f5f5"),
            ],
            layout: None,
        },
        Template {
            id: NEW_TEMPLATE_ID.to_string(),
            name: "Newsletter".to_string(),
            subject: "This Week's Updates".to_string(),
            sections: vec![
                TemplateSection::new(SectionType::Header, "Newsletter")
                    .with_style("color", "#333")
                    .with_style("fontSize", "24px"),
                TemplateSection::new(SectionType::Paragraph, "Here are this week's top stories...")
                    .with_style("color", "#666"),
            ],
            layout: None,
        },
    ]
}
