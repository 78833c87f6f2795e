use std::sync::Arc;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row, types::Json};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    clients::store::TemplateStore,
    models::{
        retry::RetryConfig,
        template::{Template, TemplateSection},
    },
    utils::retry_with_backoff,
};

// Sections are stored as JSON rather than JSONB so style keys keep their order.
const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS templates (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        subject TEXT NOT NULL,
        sections JSON NOT NULL,
        layout TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

pub struct PostgresTemplateStore {
    client: Arc<Client>,
}

impl PostgresTemplateStore {
    pub async fn connect(database_url: &str, retry_config: &RetryConfig) -> Result<Self, Error> {
        info!("Connecting to PostgreSQL database");

        let (client, connection) = retry_with_backoff(retry_config, move || async move {
            tokio_postgres::connect(database_url, NoTls).await
        })
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection closed with error");
            }
        });

        client
            .batch_execute(CREATE_TABLE)
            .await
            .map_err(|e| anyhow!("Failed to prepare templates table: {}", e))?;

        info!("PostgreSQL connection established");

        Ok(Self {
            client: Arc::new(client),
        })
    }

    fn template_from_row(row: &Row) -> Result<Template, Error> {
        let sections: Json<Vec<TemplateSection>> = row.try_get("sections")?;

        Ok(Template {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            subject: row.try_get("subject")?,
            sections: sections.0,
            layout: row.try_get("layout")?,
        })
    }

    async fn replace(&self, template: &Template) -> Result<bool, Error> {
        let updated = self
            .client
            .execute(
                r#"
                UPDATE templates
                SET name = $2, subject = $3, sections = $4, layout = $5, updated_at = now()
                WHERE id = $1
                "#,
                &[
                    &template.id,
                    &template.name,
                    &template.subject,
                    &Json(&template.sections),
                    &template.layout,
                ],
            )
            .await
            .map_err(|e| {
                error!(error = %e, template_id = %template.id, "Failed to update template");
                anyhow!("Database write failed: {}", e)
            })?;

        Ok(updated > 0)
    }

    async fn insert(&self, template: &Template) -> Result<(), Error> {
        self.client
            .execute(
                r#"
                INSERT INTO templates (id, name, subject, sections, layout)
                VALUES ($1, $2, $3, $4, $5)
                "#,
                &[
                    &template.id,
                    &template.name,
                    &template.subject,
                    &Json(&template.sections),
                    &template.layout,
                ],
            )
            .await
            .map_err(|e| {
                error!(error = %e, template_id = %template.id, "Failed to insert template");
                anyhow!("Database write failed: {}", e)
            })?;

        Ok(())
    }
}

#[async_trait]
impl TemplateStore for PostgresTemplateStore {
    async fn list(&self) -> Result<Vec<Template>> {
        let rows = self
            .client
            .query(
                "SELECT id, name, subject, sections, layout FROM templates ORDER BY created_at, id",
                &[],
            )
            .await
            .map_err(|e| anyhow!("Failed to list templates: {}", e))?;

        rows.iter().map(Self::template_from_row).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Template>> {
        let row = self
            .client
            .query_opt(
                "SELECT id, name, subject, sections, layout FROM templates WHERE id = $1",
                &[&id],
            )
            .await
            .map_err(|e| anyhow!("Failed to fetch template: {}", e))?;

        row.as_ref().map(Self::template_from_row).transpose()
    }

    async fn upsert(&self, mut template: Template) -> Result<Template> {
        if !template.is_draft() && self.replace(&template).await? {
            debug!(template_id = %template.id, "Template replaced in database");
            return Ok(template);
        }

        template.id = Uuid::new_v4().to_string();
        self.insert(&template).await?;

        debug!(template_id = %template.id, "Template inserted in database");

        Ok(template)
    }

    async fn health_check(&self) -> Result<()> {
        self.client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| anyhow!("Database health check failed: {}", e))?;

        Ok(())
    }
}
