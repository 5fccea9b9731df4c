//! Database library providing pooled connectors for PostgreSQL and SQLite
//!
//! Both backends are thin wrappers over `sqlx` pools with retrying startup
//! connection and environment-driven pool settings.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL pools
//! - `sqlite` (default) - SQLite pools, file-backed or in-memory
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All of the above
//!
//! # Examples
//!
//! ## PostgreSQL
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//!
//! let pool = postgres::connect_from_config_with_retry(&PostgresConfig::from_env()?, None).await?;
//! ```
//!
//! ## SQLite
//!
//! ```ignore
//! use database::sqlite;
//!
//! let pool = sqlite::connect("sqlite://todo.db").await?;
//! database::check_health(&pool).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use common::{DatabaseError, DatabaseResult, check_health};
