use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse, env_required};

/// SQLite pool configuration
///
/// An in-memory database lives only as long as its connection, so
/// `sqlite::memory:` URLs are pinned to a single connection that is never
/// recycled.
#[derive(Clone, Debug)]
pub struct SqliteConfig {
    pub url: String,
    pub max_connections: u32,
    /// File-backed pools only; in-memory pools stay at one connection
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// How long a writer waits on a locked database file
    pub busy_timeout_secs: u64,
    pub sqlx_logging: bool,
}

impl SqliteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    pub fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs));

        if self.is_memory() {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            options
                .max_connections(self.max_connections)
                .min_connections(self.min_connections)
                .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
                .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
        }
    }

    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs));
        Ok(if self.sqlx_logging {
            options
        } else {
            options.disable_statement_logging()
        })
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            min_connections: 0,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            busy_timeout_secs: 5,
            sqlx_logging: true,
        }
    }
}

/// Environment variables:
/// - `DATABASE_URL` (required)
/// - `DB_MAX_CONNECTIONS` (default: 5)
/// - `DB_MIN_CONNECTIONS` (default: 0)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (default: 8)
/// - `DB_IDLE_TIMEOUT_SECS` (default: 600)
/// - `DB_MAX_LIFETIME_SECS` (default: 1800)
/// - `DB_BUSY_TIMEOUT_SECS` (default: 5)
/// - `DB_SQLX_LOGGING` (default: true)
#[cfg(feature = "config")]
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("DATABASE_URL")?,
            max_connections: env_parse("DB_MAX_CONNECTIONS", "5")?,
            min_connections: env_parse("DB_MIN_CONNECTIONS", "0")?,
            acquire_timeout_secs: env_parse("DB_ACQUIRE_TIMEOUT_SECS", "8")?,
            idle_timeout_secs: env_parse("DB_IDLE_TIMEOUT_SECS", "600")?,
            max_lifetime_secs: env_parse("DB_MAX_LIFETIME_SECS", "1800")?,
            busy_timeout_secs: env_parse("DB_BUSY_TIMEOUT_SECS", "5")?,
            sqlx_logging: env_parse("DB_SQLX_LOGGING", "true")?,
        })
    }
}
