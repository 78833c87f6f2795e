use serde::Deserialize;

use crate::models::template::{NEW_TEMPLATE_ID, Template, TemplateSection};

/// Body of a save call: a template whose id may be omitted on create.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTemplateRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub sections: Vec<TemplateSection>,

    #[serde(default)]
    pub layout: Option<String>,
}

impl SaveTemplateRequest {
    pub fn into_template(self) -> Template {
        Template {
            id: self.id.unwrap_or_else(|| NEW_TEMPLATE_ID.to_string()),
            name: self.name,
            subject: self.subject,
            sections: self.sections,
            layout: self.layout,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub template_id: String,

    /// Reserved for interpolation; currently not read by the renderer.
    #[serde(default)]
    pub data: serde_json::Value,
}
