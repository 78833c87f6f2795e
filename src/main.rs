use std::sync::Arc;

use anyhow::{Error, Result, anyhow};
use email_template_service::{
    api::run_api_server,
    clients::{database::PostgresTemplateStore, memory::InMemoryTemplateStore, store::TemplateStore},
    config::{Config, StoreBackend},
    models::template::seed_templates,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;

    init_tracing(&config);

    let store: Arc<dyn TemplateStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(InMemoryTemplateStore::new()),
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow!("DATABASE_URL is required for the postgres backend"))?;
            Arc::new(PostgresTemplateStore::connect(database_url, &config.retry_config()).await?)
        }
    };

    info!(backend = ?config.store_backend, "Template store ready");

    if config.seed_templates && store.list().await?.is_empty() {
        for template in seed_templates() {
            store.upsert(template).await?;
        }
        info!("Seeded starter templates");
    }

    run_api_server(config, store).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
