use anyhow::{Result, anyhow};
use tracing::warn;

use crate::{models::template::Template, renderer::CONTENT_PLACEHOLDER};

pub fn validate_template(template: &Template) -> Result<()> {
    if let Some((index, section)) = template
        .sections
        .iter()
        .enumerate()
        .find(|(_, section)| !section.section_type.is_known())
    {
        return Err(anyhow!(
            "Section {} has unsupported type '{}'",
            index,
            section.section_type
        ));
    }

    if let Some(layout) = &template.layout {
        let placeholders = layout.matches(CONTENT_PLACEHOLDER).count();

        if placeholders == 0 {
            return Err(anyhow!(
                "Layout must contain the {} placeholder",
                CONTENT_PLACEHOLDER
            ));
        }

        if placeholders > 1 {
            warn!(
                template_id = %template.id,
                placeholders,
                "Layout contains more than one content placeholder, only the first is filled"
            );
        }
    }

    Ok(())
}
