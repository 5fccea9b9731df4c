use sqlx::PgPool;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Connect with default pool settings
pub async fn connect(database_url: &str) -> DatabaseResult<PgPool> {
    connect_from_config(&PostgresConfig::new(database_url)).await
}

/// Connect using a PostgresConfig
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::{PostgresConfig, connect_from_config};
///
/// let pool = connect_from_config(&PostgresConfig::from_env()?).await?;
/// ```
pub async fn connect_from_config(config: &PostgresConfig) -> DatabaseResult<PgPool> {
    let pool = config
        .pool_options()
        .connect_with(config.connect_options()?)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Successfully connected to PostgreSQL database"
    );
    Ok(pool)
}

/// Connect from config, retrying with exponential backoff on failure.
///
/// Useful during startup when the database may come up after the service.
pub async fn connect_from_config_with_retry(
    config: &PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<PgPool> {
    match retry_config {
        Some(retry_config) => retry_with_backoff(|| connect_from_config(config), retry_config).await,
        None => retry(|| connect_from_config(config)).await,
    }
}
