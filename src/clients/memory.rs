use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{clients::store::TemplateStore, models::template::Template};

/// Process-lifetime store that hands out sequential ids.
pub struct InMemoryTemplateStore {
    inner: RwLock<Inner>,
}

struct Inner {
    templates: Vec<Template>,
    next_id: u64,
}

impl Inner {
    fn allocate_id(&mut self) -> String {
        loop {
            let candidate = self.next_id.to_string();
            self.next_id += 1;

            if !self.templates.iter().any(|t| t.id == candidate) {
                return candidate;
            }
        }
    }
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                templates: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn list(&self) -> Result<Vec<Template>> {
        Ok(self.inner.read().await.templates.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Template>> {
        let inner = self.inner.read().await;

        Ok(inner.templates.iter().find(|t| t.id == id).cloned())
    }

    async fn upsert(&self, mut template: Template) -> Result<Template> {
        let mut inner = self.inner.write().await;

        if !template.is_draft() {
            if let Some(existing) = inner.templates.iter_mut().find(|t| t.id == template.id) {
                *existing = template.clone();
                debug!(template_id = %template.id, "Replaced template in memory");
                return Ok(template);
            }
        }

        template.id = inner.allocate_id();
        inner.templates.push(template.clone());

        debug!(template_id = %template.id, "Inserted template in memory");

        Ok(template)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
