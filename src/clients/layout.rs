use std::path::PathBuf;

use anyhow::{Error, Result, anyhow};
use tracing::debug;

/// The shared base layout kept on disk. Read-only.
#[derive(Debug, Clone)]
pub struct LayoutAsset {
    path: PathBuf,
}

impl LayoutAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<String, Error> {
        let layout = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            anyhow!(
                "Failed to read layout from {}: {}",
                self.path.display(),
                e
            )
        })?;

        debug!(path = %self.path.display(), bytes = layout.len(), "Layout loaded");

        Ok(layout)
    }
}
