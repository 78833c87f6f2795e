use anyhow::Result;
use async_trait::async_trait;

use crate::models::template::Template;

/// Persistence for templates, keyed by id.
///
/// `upsert` replaces a record whose id already exists; any other id (the
/// draft sentinel included) is swapped for a freshly assigned one. Writers
/// to the same id race with last-writer-wins semantics.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Template>>;

    async fn get(&self, id: &str) -> Result<Option<Template>>;

    async fn upsert(&self, template: Template) -> Result<Template>;

    async fn health_check(&self) -> Result<()>;
}
