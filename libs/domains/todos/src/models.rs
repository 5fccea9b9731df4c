use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const MAX_TITLE_LEN: u64 = 200;
pub const MAX_DESCRIPTION_LEN: u64 = 1024;

/// Validated payload for Create and Update.
///
/// `reminder: None` is stored as SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewTodo {
    #[validate(length(max = 200, message = "title must be at most 200 characters"))]
    pub title: String,

    #[validate(length(max = 1024, message = "description must be at most 1024 characters"))]
    pub description: String,

    pub reminder: Option<DateTime<Utc>>,
}

/// One row of the `todo` table as the storage engine returns it
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TodoRecord {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub reminder: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// HTTP/JSON gateway shapes
// ---------------------------------------------------------------------------

/// Todo as exchanged over the JSON gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TodoBody {
    /// Ignored on create; on update the path id wins
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    #[schema(example = "buy milk", max_length = 200)]
    pub title: String,

    #[serde(default)]
    #[schema(example = "2%", max_length = 1024)]
    pub description: String,

    /// RFC 3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub reminder: Option<String>,
}

/// Body of `POST /v1/todo` and `PUT|PATCH /v1/todo/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TodoRequest {
    #[serde(default)]
    #[schema(example = "v1")]
    pub api: String,

    pub todo: Option<TodoBody>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApiQuery {
    /// Requested API version; empty means current
    #[serde(default)]
    pub api: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateTodoResponse {
    pub api: String,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadTodoResponse {
    pub api: String,
    pub todo: TodoBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateTodoResponse {
    pub api: String,
    pub updated: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteTodoResponse {
    pub api: String,
    pub deleted: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadAllTodoResponse {
    pub api: String,
    pub todos: Vec<TodoBody>,
}
