use sqlx::SqlitePool;
use tracing::info;

use super::SqliteConfig;
use crate::common::{DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Connect with default pool settings
pub async fn connect(database_url: &str) -> DatabaseResult<SqlitePool> {
    connect_from_config(&SqliteConfig::new(database_url)).await
}

pub async fn connect_from_config(config: &SqliteConfig) -> DatabaseResult<SqlitePool> {
    let pool = config
        .pool_options()
        .connect_with(config.connect_options()?)
        .await?;

    info!(
        in_memory = config.is_memory(),
        "Successfully opened SQLite database"
    );
    Ok(pool)
}

/// Open the database, retrying with exponential backoff on failure
pub async fn connect_from_config_with_retry(
    config: &SqliteConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<SqlitePool> {
    match retry_config {
        Some(retry_config) => retry_with_backoff(|| connect_from_config(config), retry_config).await,
        None => retry(|| connect_from_config(config)).await,
    }
}
