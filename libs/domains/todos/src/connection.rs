//! Per-request connection acquisition.
//!
//! Every store call takes exactly one connection from the pool and runs its
//! statement (and any follow-up metadata read) on it. The connection goes
//! back to the pool when the returned guard drops, including when the
//! request future is cancelled.

use sqlx::pool::PoolConnection;
use sqlx::{Database, Pool};
use tracing::warn;

use crate::error::{TodoError, TodoResult};

pub async fn acquire<DB: Database>(pool: &Pool<DB>) -> TodoResult<PoolConnection<DB>> {
    pool.acquire().await.map_err(|e| {
        warn!(backend = DB::NAME, error = %e, "Connection acquisition failed");
        TodoError::unknown("Failed to connect to database", e)
    })
}
