/// Unified database error type for pool setup and health checks
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level failure reported by sqlx
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
