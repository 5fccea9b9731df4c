use sqlx::{Connection, Database, Pool};
use tracing::debug;

use super::DatabaseError;

/// Check database health by pinging one pooled connection.
///
/// Works for any sqlx backend. The connection goes back to the pool when
/// the check returns.
///
/// # Example
/// ```ignore
/// use database::{check_health, sqlite};
///
/// let pool = sqlite::connect("sqlite::memory:").await?;
/// check_health(&pool).await?;
/// ```
pub async fn check_health<DB: Database>(pool: &Pool<DB>) -> Result<(), DatabaseError> {
    debug!(backend = DB::NAME, "Running database health check");

    let mut conn = pool.acquire().await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("{} acquire failed: {}", DB::NAME, e))
    })?;
    conn.ping().await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("{} ping failed: {}", DB::NAME, e))
    })?;

    debug!(backend = DB::NAME, "Database health check passed");
    Ok(())
}
