use rpc::todo::v1::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ReadAllRequest,
    ReadAllResponse, ReadRequest, ReadResponse, Todo, UpdateRequest, UpdateResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{TodoError, TodoResult};
use crate::mapper::{new_todo_from_proto, record_to_proto, row_count, single_row};
use crate::repository::TodoStore;
use crate::version::{API_VERSION, check_api};

/// Operation handlers for the five todo RPCs.
///
/// Every handler runs the same pipeline: version gate, input validation,
/// one store call, result mapping. Nothing touches storage until the
/// request has passed the first two steps.
pub struct TodoService<S: TodoStore> {
    store: Arc<S>,
}

impl<S: TodoStore> Clone for TodoService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

fn require_todo(todo: Option<Todo>) -> TodoResult<Todo> {
    todo.ok_or_else(|| TodoError::InvalidArgument("Todo field is required".to_string()))
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip(self, request), fields(api = %request.api))]
    pub async fn create(&self, request: CreateRequest) -> TodoResult<CreateResponse> {
        check_api(&request.api)?;
        let new_todo = new_todo_from_proto(&require_todo(request.todo)?)?;

        let id = self.store.insert(&new_todo).await?;

        info!(todo_id = id, "Created todo");
        Ok(CreateResponse {
            api: API_VERSION.to_string(),
            id,
        })
    }

    #[instrument(skip(self, request), fields(api = %request.api, todo_id = request.id))]
    pub async fn read(&self, request: ReadRequest) -> TodoResult<ReadResponse> {
        check_api(&request.api)?;

        let rows = self.store.select_by_id(request.id).await?;
        let todo = record_to_proto(single_row(request.id, rows)?)?;

        Ok(ReadResponse {
            api: API_VERSION.to_string(),
            todo: Some(todo),
        })
    }

    /// A missing row is not an error here: the response simply reports
    /// zero rows updated.
    #[instrument(skip(self, request), fields(api = %request.api))]
    pub async fn update(&self, request: UpdateRequest) -> TodoResult<UpdateResponse> {
        check_api(&request.api)?;
        let todo = require_todo(request.todo)?;
        let changes = new_todo_from_proto(&todo)?;

        let updated = self.store.update(todo.id, &changes).await?;

        debug!(todo_id = todo.id, updated, "Updated todo");
        Ok(UpdateResponse {
            api: API_VERSION.to_string(),
            updated: row_count(updated),
        })
    }

    #[instrument(skip(self, request), fields(api = %request.api, todo_id = request.id))]
    pub async fn delete(&self, request: DeleteRequest) -> TodoResult<DeleteResponse> {
        check_api(&request.api)?;

        let deleted = self.store.delete(request.id).await?;
        if deleted == 0 {
            return Err(TodoError::NotFound(request.id));
        }

        info!(deleted, "Deleted todo");
        Ok(DeleteResponse {
            api: API_VERSION.to_string(),
            deleted: row_count(deleted),
        })
    }

    /// Any row that fails to decode fails the whole call.
    #[instrument(skip(self, request), fields(api = %request.api))]
    pub async fn read_all(&self, request: ReadAllRequest) -> TodoResult<ReadAllResponse> {
        check_api(&request.api)?;

        let todos = self
            .store
            .select_all()
            .await?
            .into_iter()
            .map(record_to_proto)
            .collect::<TodoResult<Vec<_>>>()?;

        debug!(count = todos.len(), "Read all todos");
        Ok(ReadAllResponse {
            api: API_VERSION.to_string(),
            todos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::TodoRecord;
    use crate::repository::MockTodoStore;
    use chrono::{TimeZone, Utc};
    use prost_types::Timestamp;

    fn todo(title: &str) -> Todo {
        Todo {
            id: 0,
            title: title.to_string(),
            description: "2%".to_string(),
            reminder: Some(Timestamp {
                seconds: 1_704_067_200,
                nanos: 0,
            }),
        }
    }

    fn record(id: i64) -> TodoRecord {
        TodoRecord {
            id,
            title: Some("buy milk".into()),
            description: Some("2%".into()),
            reminder: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    /// A store that fails the test if any method is called
    fn untouched_store() -> MockTodoStore {
        let mut store = MockTodoStore::new();
        store.expect_insert().never();
        store.expect_select_by_id().never();
        store.expect_update().never();
        store.expect_delete().never();
        store.expect_select_all().never();
        store
    }

    #[tokio::test]
    async fn test_create_returns_generated_id() {
        let mut store = MockTodoStore::new();
        store
            .expect_insert()
            .withf(|new_todo| {
                new_todo.title == "buy milk"
                    && new_todo.reminder == Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            })
            .times(1)
            .returning(|_| Ok(1));

        let service = TodoService::new(store);
        let response = service
            .create(CreateRequest {
                api: "v1".into(),
                todo: Some(todo("buy milk")),
            })
            .await
            .unwrap();

        assert_eq!(response.api, "v1");
        assert_eq!(response.id, 1);
    }

    #[tokio::test]
    async fn test_create_empty_api_means_current() {
        let mut store = MockTodoStore::new();
        store.expect_insert().returning(|_| Ok(7));

        let service = TodoService::new(store);
        let response = service
            .create(CreateRequest {
                api: String::new(),
                todo: Some(todo("x")),
            })
            .await
            .unwrap();

        assert_eq!(response.api, API_VERSION);
    }

    #[tokio::test]
    async fn test_create_bad_reminder_never_touches_store() {
        let service = TodoService::new(untouched_store());
        let mut bad = todo("x");
        bad.reminder = Some(Timestamp {
            seconds: 1,
            nanos: 1_000_000_000,
        });

        let err = service
            .create(CreateRequest {
                api: "v1".into(),
                todo: Some(bad),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_create_missing_todo_is_invalid_argument() {
        let service = TodoService::new(untouched_store());
        let err = service
            .create(CreateRequest {
                api: "v1".into(),
                todo: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_version_gate_wins_over_everything() {
        let service = TodoService::new(untouched_store());
        let mut bad = todo(&"x".repeat(500));
        bad.reminder = Some(Timestamp {
            seconds: i64::MIN,
            nanos: -1,
        });

        let create = service
            .create(CreateRequest {
                api: "v2".into(),
                todo: Some(bad.clone()),
            })
            .await
            .unwrap_err();
        let read = service
            .read(ReadRequest {
                api: "v2".into(),
                id: -1,
            })
            .await
            .unwrap_err();
        let update = service
            .update(UpdateRequest {
                api: "v2".into(),
                todo: None,
            })
            .await
            .unwrap_err();
        let delete = service
            .delete(DeleteRequest {
                api: "v2".into(),
                id: 1,
            })
            .await
            .unwrap_err();
        let read_all = service
            .read_all(ReadAllRequest { api: "v2".into() })
            .await
            .unwrap_err();

        for err in [create, read, update, delete, read_all] {
            assert_eq!(err.kind(), ErrorKind::Unimplemented);
            assert!(err.to_string().contains("but asked for 'v2'"));
        }
    }

    #[tokio::test]
    async fn test_read_single_row() {
        let mut store = MockTodoStore::new();
        store
            .expect_select_by_id()
            .withf(|id| *id == 1)
            .returning(|id| Ok(vec![record(id)]));

        let service = TodoService::new(store);
        let response = service
            .read(ReadRequest {
                api: "v1".into(),
                id: 1,
            })
            .await
            .unwrap();

        let todo = response.todo.unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.title, "buy milk");
        assert_eq!(todo.reminder.unwrap().seconds, 1_704_067_200);
    }

    #[tokio::test]
    async fn test_read_no_rows_is_not_found() {
        let mut store = MockTodoStore::new();
        store.expect_select_by_id().returning(|_| Ok(vec![]));

        let service = TodoService::new(store);
        let err = service
            .read(ReadRequest {
                api: "v1".into(),
                id: 404,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Todo with ID='404' is not found");
    }

    #[tokio::test]
    async fn test_read_multiple_rows_is_unknown() {
        let mut store = MockTodoStore::new();
        store
            .expect_select_by_id()
            .returning(|id| Ok(vec![record(id), record(id)]));

        let service = TodoService::new(store);
        let err = service
            .read(ReadRequest {
                api: "v1".into(),
                id: 3,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn test_store_failure_propagates_as_unknown() {
        let mut store = MockTodoStore::new();
        store.expect_select_by_id().returning(|_| {
            Err(TodoError::unknown(
                "Failed to connect to database",
                "pool timed out while waiting for an open connection",
            ))
        });

        let service = TodoService::new(store);
        let err = service
            .read(ReadRequest {
                api: "v1".into(),
                id: 1,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.to_string().starts_with("Failed to connect to database -> "));
    }

    #[tokio::test]
    async fn test_update_zero_rows_is_success() {
        let mut store = MockTodoStore::new();
        store
            .expect_update()
            .withf(|id, _| *id == 99)
            .returning(|_, _| Ok(0));

        let service = TodoService::new(store);
        let mut missing = todo("x");
        missing.id = 99;
        let response = service
            .update(UpdateRequest {
                api: "v1".into(),
                todo: Some(missing),
            })
            .await
            .unwrap();

        assert_eq!(response.updated, 0);
    }

    #[tokio::test]
    async fn test_update_too_long_description_never_touches_store() {
        let service = TodoService::new(untouched_store());
        let mut long = todo("x");
        long.description = "d".repeat(1025);

        let err = service
            .update(UpdateRequest {
                api: "v1".into(),
                todo: Some(long),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_update_bad_reminder_never_touches_store() {
        let service = TodoService::new(untouched_store());
        let mut bad = todo("buy milk");
        bad.id = 1;
        bad.reminder = Some(Timestamp {
            seconds: 0,
            nanos: -1,
        });

        let err = service
            .update(UpdateRequest {
                api: "v1".into(),
                todo: Some(bad),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().starts_with("Reminder field has invalid format -> "));
    }

    #[tokio::test]
    async fn test_delete_zero_rows_is_not_found() {
        let mut store = MockTodoStore::new();
        store.expect_delete().returning(|_| Ok(0));

        let service = TodoService::new(store);
        let err = service
            .delete(DeleteRequest {
                api: "v1".into(),
                id: 12,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_reports_count() {
        let mut store = MockTodoStore::new();
        store.expect_delete().returning(|_| Ok(1));

        let service = TodoService::new(store);
        let response = service
            .delete(DeleteRequest {
                api: "".into(),
                id: 12,
            })
            .await
            .unwrap();

        assert_eq!(response.deleted, 1);
        assert_eq!(response.api, "v1");
    }

    #[tokio::test]
    async fn test_read_all_aborts_on_undecodable_row() {
        let mut store = MockTodoStore::new();
        store.expect_select_all().returning(|| {
            let mut broken = record(2);
            broken.reminder = Some(Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap());
            Ok(vec![record(1), broken, record(3)])
        });

        let service = TodoService::new(store);
        let err = service
            .read_all(ReadAllRequest { api: "v1".into() })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn test_read_all_returns_every_row() {
        let mut store = MockTodoStore::new();
        store
            .expect_select_all()
            .returning(|| Ok(vec![record(1), record(2)]));

        let service = TodoService::new(store);
        let response = service
            .read_all(ReadAllRequest { api: "v1".into() })
            .await
            .unwrap();

        let ids: Vec<i64> = response.todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
