use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::database::DatabaseManager;
use crate::notion::{ContentTreeFetcher, DocumentApi, NotionClient, NotionError};
use crate::services::{ContactNotifier, LocalObjectStorage, ObjectStorage};

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub storage: Arc<dyn ObjectStorage>,
    pub notifier: Option<Arc<ContactNotifier>>,
    notion: Option<ContentTreeFetcher>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        pool: PgPool,
        storage: Arc<dyn ObjectStorage>,
        notifier: Option<Arc<ContactNotifier>>,
        notion: Option<Arc<dyn DocumentApi>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            storage,
            notifier,
            notion: notion.map(ContentTreeFetcher::new),
        }
    }

    /// Wire real collaborators from configuration
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let pool = DatabaseManager::lazy_pool(&config.database).context("failed to create database pool")?;
        let storage = build_storage(&config).await?;

        let notifier = ContactNotifier::from_config(&config.email)?.map(Arc::new);
        if notifier.is_none() {
            info!("SMTP settings incomplete; contact notifications disabled");
        }

        let notion: Option<Arc<dyn DocumentApi>> = match NotionClient::new(&config.notion) {
            Ok(client) => Some(Arc::new(client)),
            Err(NotionError::NotConfigured) => {
                warn!("NOTION_TOKEN not set; /api/notion endpoints will return 500");
                None
            }
            Err(e) => return Err(e).context("failed to build Notion client"),
        };

        Ok(Self::new(config, pool, storage, notifier, notion))
    }

    /// The document fetcher, or the configuration error to report
    pub fn notion(&self) -> Result<&ContentTreeFetcher, NotionError> {
        self.notion.as_ref().ok_or(NotionError::NotConfigured)
    }
}

async fn build_storage(config: &AppConfig) -> anyhow::Result<Arc<dyn ObjectStorage>> {
    match config.storage.backend {
        StorageBackend::Local => {
            info!(dir = ?config.storage.upload_dir, "using local upload storage");
            Ok(Arc::new(LocalObjectStorage::new(
                config.storage.upload_dir.clone(),
                config.storage.upload_base_url.clone(),
            )))
        }
        #[cfg(feature = "s3")]
        StorageBackend::S3 => {
            if config.storage.s3_bucket.is_empty() {
                anyhow::bail!("STORAGE_BACKEND=s3 requires S3_BUCKET_NAME");
            }
            info!(bucket = %config.storage.s3_bucket, "using S3 upload storage");
            let storage = crate::services::storage::S3ObjectStorage::new(
                config.storage.s3_bucket.clone(),
                config.storage.aws_region.clone(),
            )
            .await;
            Ok(Arc::new(storage))
        }
        #[cfg(not(feature = "s3"))]
        StorageBackend::S3 => {
            anyhow::bail!("STORAGE_BACKEND=s3 requires building with the `s3` feature")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDocumentApi;

    #[tokio::test]
    async fn notion_absent_reports_not_configured() {
        let (state, _dir) = crate::testing::test_state(None);
        assert!(matches!(state.notion(), Err(NotionError::NotConfigured)));
    }

    #[tokio::test]
    async fn notion_present_when_api_supplied() {
        let api: Arc<dyn DocumentApi> = Arc::new(ScriptedDocumentApi::new());
        let (state, _dir) = crate::testing::test_state(Some(api));
        assert!(state.notion().is_ok());
    }

    #[tokio::test]
    async fn from_config_without_token_disables_notion() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = crate::testing::test_config(dir.path());
        config.notion.token = None;

        let state = AppState::from_config(config).await.unwrap();
        assert!(state.notion().is_err());
        assert!(state.notifier.is_none());
        assert_eq!(state.storage.scheme(), "local");
    }
}
