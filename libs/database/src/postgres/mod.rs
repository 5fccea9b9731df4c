//! PostgreSQL connection pools
//!
//! Provides pool construction with environment-driven settings and startup retry.

mod config;
mod connector;

pub use config::PostgresConfig;
pub use connector::{connect, connect_from_config, connect_from_config_with_retry};

pub use sqlx::PgPool;
