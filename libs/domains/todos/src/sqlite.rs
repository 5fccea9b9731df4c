use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::connection::acquire;
use crate::error::{TodoError, TodoResult};
use crate::models::{NewTodo, TodoRecord};
use crate::repository::TodoStore;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todo (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       VARCHAR(200),
    description VARCHAR(1024),
    reminder    DATETIME NULL
)"#;

/// Embedded store, used for development and tests
#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn ensure_schema(&self) -> TodoResult<()> {
        let mut conn = acquire(&self.pool).await?;
        sqlx::query(CREATE_TABLE)
            .execute(&mut *conn)
            .await
            .map_err(|e| TodoError::unknown("Failed to create todo table", e))?;
        Ok(())
    }

    async fn insert(&self, todo: &NewTodo) -> TodoResult<i64> {
        let mut conn = acquire(&self.pool).await?;
        // last_insert_rowid is per connection, so it must come from this one.
        let result = sqlx::query("INSERT INTO todo (title, description, reminder) VALUES (?, ?, ?)")
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.reminder)
            .execute(&mut *conn)
            .await
            .map_err(|e| TodoError::unknown("Failed to insert into todo", e))?;

        let id = result.last_insert_rowid();
        debug!(todo_id = id, "Inserted todo row");
        Ok(id)
    }

    async fn select_by_id(&self, id: i64) -> TodoResult<Vec<TodoRecord>> {
        let mut conn = acquire(&self.pool).await?;
        sqlx::query_as::<_, TodoRecord>(
            "SELECT id, title, description, reminder FROM todo WHERE id = ?",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| TodoError::unknown("Failed to select from todo", e))
    }

    async fn update(&self, id: i64, todo: &NewTodo) -> TodoResult<u64> {
        let mut conn = acquire(&self.pool).await?;
        let result =
            sqlx::query("UPDATE todo SET title = ?, description = ?, reminder = ? WHERE id = ?")
                .bind(&todo.title)
                .bind(&todo.description)
                .bind(todo.reminder)
                .bind(id)
                .execute(&mut *conn)
                .await
                .map_err(|e| TodoError::unknown("Failed to update todo", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> TodoResult<u64> {
        let mut conn = acquire(&self.pool).await?;
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| TodoError::unknown("Failed to delete todo", e))?;

        Ok(result.rows_affected())
    }

    async fn select_all(&self) -> TodoResult<Vec<TodoRecord>> {
        let mut conn = acquire(&self.pool).await?;
        sqlx::query_as::<_, TodoRecord>("SELECT id, title, description, reminder FROM todo")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| TodoError::unknown("Failed to select from todo", e))
    }
}
