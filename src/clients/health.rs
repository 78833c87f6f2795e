use std::{collections::HashMap, sync::Arc, time::Instant};

use chrono::Utc;
use tracing::{debug, warn};

use crate::{
    clients::{store::TemplateStore, uploads::UploadStorage},
    models::health::{HealthCheckResponse, HealthStatus, ServiceHealth},
};

pub struct HealthChecker {
    store: Arc<dyn TemplateStore>,
    uploads: UploadStorage,
}

impl HealthChecker {
    pub fn new(store: Arc<dyn TemplateStore>, uploads: UploadStorage) -> Self {
        Self { store, uploads }
    }

    pub async fn check_all(&self) -> HealthCheckResponse {
        let mut checks = HashMap::new();

        let store_health = self.check_store().await;
        checks.insert("template_store".to_string(), store_health);

        let uploads_health = self.check_uploads().await;
        checks.insert("upload_storage".to_string(), uploads_health);

        let overall_status = self.determine_overall_status(&checks);

        HealthCheckResponse {
            status: overall_status,
            timestamp: Utc::now(),
            checks,
        }
    }

    async fn check_store(&self) -> ServiceHealth {
        let start = Instant::now();

        match self.store.health_check().await {
            Ok(_) => {
                let elapsed = start.elapsed().as_millis() as u64;
                debug!(response_time_ms = elapsed, "Template store health check passed");
                ServiceHealth::healthy(elapsed)
            }
            Err(e) => {
                warn!(error = %e, "Template store health check failed");
                ServiceHealth::unhealthy(format!("Health check failed: {}", e))
            }
        }
    }

    async fn check_uploads(&self) -> ServiceHealth {
        let start = Instant::now();

        match self.uploads.ensure_dir().await {
            Ok(_) => {
                let elapsed = start.elapsed().as_millis() as u64;
                debug!(response_time_ms = elapsed, "Upload storage health check passed");
                ServiceHealth::healthy(elapsed)
            }
            Err(e) => {
                warn!(error = %e, "Upload storage health check failed");
                ServiceHealth::unhealthy(e.to_string())
            }
        }
    }

    // Only the store is critical; broken uploads leave templates usable.
    fn determine_overall_status(&self, checks: &HashMap<String, ServiceHealth>) -> HealthStatus {
        let critical_unhealthy = checks
            .iter()
            .filter(|(name, _)| name.as_str() == "template_store")
            .any(|(_, health)| health.status == HealthStatus::Unhealthy);

        let has_unhealthy = checks
            .values()
            .any(|health| health.status == HealthStatus::Unhealthy);

        if critical_unhealthy {
            HealthStatus::Unhealthy
        } else if has_unhealthy {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }
}
