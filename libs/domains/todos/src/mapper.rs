//! Translation between RPC messages, validated inputs, and raw store outcomes.

use rpc::todo::v1::Todo;
use validator::Validate;

use crate::codec;
use crate::error::{TodoError, TodoResult};
use crate::models::{NewTodo, TodoRecord};

/// Validate an incoming todo. Lengths are checked before the reminder.
pub fn new_todo_from_proto(todo: &Todo) -> TodoResult<NewTodo> {
    let reminder = todo
        .reminder
        .as_ref()
        .map(codec::to_datetime)
        .transpose();

    let new_todo = NewTodo {
        title: todo.title.clone(),
        description: todo.description.clone(),
        reminder: None,
    };
    new_todo
        .validate()
        .map_err(|e| TodoError::invalid_argument("Todo field has invalid length", e))?;

    let reminder =
        reminder.map_err(|e| TodoError::invalid_argument("Reminder field has invalid format", e))?;

    Ok(NewTodo {
        reminder,
        ..new_todo
    })
}

/// Stored row to wire message. `NULL` text columns become empty strings.
pub fn record_to_proto(record: TodoRecord) -> TodoResult<Todo> {
    let reminder = record
        .reminder
        .as_ref()
        .map(codec::to_timestamp)
        .transpose()
        .map_err(|e| TodoError::unknown("Reminder field has invalid format", e))?;

    Ok(Todo {
        id: record.id,
        title: record.title.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        reminder,
    })
}

/// Exactly one row is a hit; zero is `NotFound`; more than one means the
/// primary key invariant is broken.
pub fn single_row(id: i64, mut rows: Vec<TodoRecord>) -> TodoResult<TodoRecord> {
    match rows.len() {
        0 => Err(TodoError::NotFound(id)),
        1 => rows
            .pop()
            .ok_or_else(|| TodoError::anomaly(format!("Lost todo row with ID='{}'", id))),
        n => Err(TodoError::anomaly(format!(
            "Found multiple todo rows with ID='{}' ({} rows)",
            id, n
        ))),
    }
}

/// Row counts travel as `int64` on the wire
pub fn row_count(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
