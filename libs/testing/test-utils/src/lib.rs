//! Shared test utilities for domain testing
//!
//! - `TestDatabase::sqlite()`: private in-memory SQLite pool (always available)
//! - `TestDatabase::postgres()`: PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: deterministic todo field values
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::sqlite().await;
//! let pool = db.sqlite_pool();
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let title = builder.title("main");
//! # }
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use database::sqlite::{SqliteConfig, connect_from_config};

#[cfg(feature = "postgres")]
mod postgres;

enum Backend {
    Sqlite(sqlx::SqlitePool),
    #[cfg(feature = "postgres")]
    Postgres(postgres::PostgresContainer),
}

/// A database private to one test
pub struct TestDatabase {
    backend: Backend,
    pub connection_string: String,
}

impl TestDatabase {
    /// In-memory SQLite on a single pinned connection; gone when the pool
    /// is dropped.
    pub async fn sqlite() -> Self {
        let config = SqliteConfig::default();
        let pool = connect_from_config(&config)
            .await
            .expect("Failed to open in-memory SQLite database");

        Self {
            backend: Backend::Sqlite(pool),
            connection_string: config.url,
        }
    }

    /// Pool of a database opened with [`TestDatabase::sqlite`]
    pub fn sqlite_pool(&self) -> sqlx::SqlitePool {
        match &self.backend {
            Backend::Sqlite(pool) => pool.clone(),
            #[cfg(feature = "postgres")]
            Backend::Postgres(_) => panic!("sqlite_pool() called on a Postgres test database"),
        }
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        tracing::debug!(url = %self.connection_string, "Cleaning up test database");
    }
}

/// Deterministic todo field values, seeded per test
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name so every run of a test sees the same data
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_todo");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.title("main"), "todo-7-main");
    /// ```
    pub fn title(&self, suffix: &str) -> String {
        format!("todo-{}-{}", self.seed, suffix)
    }

    pub fn description(&self, suffix: &str) -> String {
        format!("description of todo-{}-{}", self.seed, suffix)
    }

    /// A whole-second instant within a year after 2024-01-01T00:00:00Z
    pub fn reminder(&self) -> DateTime<Utc> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        base + Duration::seconds((self.seed % (365 * 24 * 3600)) as i64)
    }
}
