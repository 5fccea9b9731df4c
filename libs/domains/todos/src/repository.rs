use async_trait::async_trait;

use crate::error::TodoResult;
use crate::models::{NewTodo, TodoRecord};

/// Persistence seam for the `todo` table.
///
/// Each call acquires its own pooled connection and issues one statement.
/// Implementations report raw outcomes (rows, counts, generated ids); turning
/// those into responses or `NotFound` is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Create the `todo` table if it does not exist yet
    async fn ensure_schema(&self) -> TodoResult<()>;

    /// Insert a row and return the id the engine assigned to it
    async fn insert(&self, todo: &NewTodo) -> TodoResult<i64>;

    /// All rows whose id matches; normally zero or one
    async fn select_by_id(&self, id: i64) -> TodoResult<Vec<TodoRecord>>;

    /// Overwrite title, description and reminder; returns rows affected
    async fn update(&self, id: i64, todo: &NewTodo) -> TodoResult<u64>;

    /// Returns rows affected
    async fn delete(&self, id: i64) -> TodoResult<u64>;

    /// Every row, in no particular order
    async fn select_all(&self) -> TodoResult<Vec<TodoRecord>>;
}
