use anyhow::Result;
use email_template_service::{
    clients::{database::PostgresTemplateStore, store::TemplateStore},
    models::{
        retry::RetryConfig,
        template::{NEW_TEMPLATE_ID, SectionType, Template, TemplateSection},
    },
};

// Runs only against a real database: set TEST_DATABASE_URL to enable.
async fn connect() -> Result<Option<PostgresTemplateStore>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        println!("TEST_DATABASE_URL not set, skipping PostgreSQL test");
        return Ok(None);
    };

    let retry_config = RetryConfig {
        max_attempts: 3,
        initial_delay_ms: 100,
        max_delay_ms: 500,
        backoff_multiplier: 2,
    };

    Ok(Some(PostgresTemplateStore::connect(&url, &retry_config).await?))
}

/// Test: Templates round-trip through PostgreSQL with style order intact
#[tokio::test]
async fn test_postgres_upsert_and_get() -> Result<()> {
    let Some(store) = connect().await? else {
        return Ok(());
    };

    let template = Template {
        id: NEW_TEMPLATE_ID.to_string(),
        name: "Postgres".to_string(),
        subject: "Stored".to_string(),
        sections: vec![
            TemplateSection::new(SectionType::Button, "Click")
                .with_style("zIndex", "2")
                .with_style("color", "#fff")
                .with_style("backgroundColor", "#000"),
        ],
        layout: Some("<main>{{content}}</main>".to_string()),
    };

    let saved = store.upsert(template).await?;
    assert_ne!(saved.id, NEW_TEMPLATE_ID);

    let fetched = store.get(&saved.id).await?;
    assert_eq!(fetched.as_ref(), Some(&saved));

    let keys: Vec<&String> = saved.sections[0].style.keys().collect();
    assert_eq!(keys, vec!["zIndex", "color", "backgroundColor"]);

    let before = store.list().await?.len();

    let mut edited = saved.clone();
    edited.subject = "Edited".to_string();
    let replaced = store.upsert(edited.clone()).await?;

    assert_eq!(replaced.id, saved.id);
    assert_eq!(store.list().await?.len(), before);
    assert_eq!(store.get(&saved.id).await?, Some(edited));

    store.health_check().await?;

    Ok(())
}
