use std::path::{Path, PathBuf};

use anyhow::{Error, Result, anyhow};
use chrono::Utc;
use tokio::fs;
use tracing::info;

use crate::config::Config;

/// Writes uploaded images to a directory that is served under `url_prefix`.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadStorage {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix: String = url_prefix.into();

        Self {
            dir: dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.uploads_dir, &config.uploads_url_prefix)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub async fn ensure_dir(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| anyhow!("Failed to create uploads directory: {}", e))
    }

    /// Stores `bytes` and returns the public URL of the new file.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, Error> {
        self.ensure_dir().await?;

        let filename = unique_filename(original_name);
        let path = self.dir.join(&filename);

        fs::write(&path, bytes)
            .await
            .map_err(|e| anyhow!("Failed to write uploaded file: {}", e))?;

        info!(
            filename = %filename,
            size_bytes = bytes.len(),
            "Upload stored"
        );

        Ok(format!("{}/{}", self.url_prefix, filename))
    }
}

/// Keeps ASCII alphanumerics and dots only.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect()
}

fn unique_filename(original_name: &str) -> String {
    let suffix: u32 = rand::random_range(0..1_000_000_000);

    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        suffix,
        sanitize_filename(original_name)
    )
}
