use anyhow::Context;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::lazy_pool(&config.database)?;
    DatabaseManager::migrate(&pool)
        .await
        .context("failed to apply migrations")?;

    output_success(&output_format, "Database migrations applied", None)
}
