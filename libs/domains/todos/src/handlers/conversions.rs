//! JSON gateway DTOs to wire messages and back.

use axum_helpers::AppError;
use chrono::{DateTime, SecondsFormat};
use prost_types::Timestamp;
use rpc::todo::v1::Todo;

use crate::codec;
use crate::models::TodoBody;

/// Parse an RFC 3339 reminder. Absent or empty means no reminder.
pub fn parse_reminder(reminder: Option<&str>) -> Result<Option<Timestamp>, AppError> {
    let Some(raw) = reminder.filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let invalid = |e: &dyn std::fmt::Display| {
        AppError::BadRequest(format!("Reminder field has invalid format -> {}", e))
    };

    let parsed = DateTime::parse_from_rfc3339(raw).map_err(|e| invalid(&e))?;
    codec::to_timestamp(&parsed.to_utc())
        .map(Some)
        .map_err(|e| invalid(&e))
}

pub fn format_reminder(reminder: &Timestamp) -> Result<String, AppError> {
    codec::to_datetime(reminder)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .map_err(|e| AppError::InternalServerError(format!("Reminder field has invalid format -> {}", e)))
}

pub fn body_to_proto(body: TodoBody) -> Result<Todo, AppError> {
    Ok(Todo {
        id: body.id,
        reminder: parse_reminder(body.reminder.as_deref())?,
        title: body.title,
        description: body.description,
    })
}

pub fn proto_to_body(todo: Todo) -> Result<TodoBody, AppError> {
    Ok(TodoBody {
        id: todo.id,
        reminder: todo.reminder.as_ref().map(format_reminder).transpose()?,
        title: todo.title,
        description: todo.description,
    })
}
