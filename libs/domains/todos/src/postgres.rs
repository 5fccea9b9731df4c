use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::connection::acquire;
use crate::error::{TodoError, TodoResult};
use crate::models::{NewTodo, TodoRecord};
use crate::repository::TodoStore;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todo (
    id          BIGSERIAL PRIMARY KEY,
    title       VARCHAR(200),
    description VARCHAR(1024),
    reminder    TIMESTAMPTZ NULL
)"#;

#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
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
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO todo (title, description, reminder) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.reminder)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| TodoError::unknown("Failed to insert into todo", e))?;

        debug!(todo_id = id, "Inserted todo row");
        Ok(id)
    }

    async fn select_by_id(&self, id: i64) -> TodoResult<Vec<TodoRecord>> {
        let mut conn = acquire(&self.pool).await?;
        sqlx::query_as::<_, TodoRecord>(
            "SELECT id, title, description, reminder FROM todo WHERE id = $1",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| TodoError::unknown("Failed to select from todo", e))
    }

    async fn update(&self, id: i64, todo: &NewTodo) -> TodoResult<u64> {
        let mut conn = acquire(&self.pool).await?;
        let result = sqlx::query(
            "UPDATE todo SET title = $1, description = $2, reminder = $3 WHERE id = $4",
        )
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
        let result = sqlx::query("DELETE FROM todo WHERE id = $1")
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
