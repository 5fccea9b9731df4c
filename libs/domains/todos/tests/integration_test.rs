//! Integration tests for the Todo domain
//!
//! The service runs against a real store: an in-memory SQLite database for
//! the default suite, a testcontainers Postgres for the `#[ignore]`d one.

use domain_todos::codec;
use domain_todos::*;
use prost_types::Timestamp;
use rpc::todo::v1::{
    CreateRequest, DeleteRequest, ReadAllRequest, ReadRequest, Todo, UpdateRequest,
};
use test_utils::{TestDataBuilder, TestDatabase};

async fn sqlite_service(db: &TestDatabase) -> TodoService<SqliteTodoStore> {
    let store = SqliteTodoStore::new(db.sqlite_pool());
    store.ensure_schema().await.unwrap();
    TodoService::new(store)
}

fn sample(builder: &TestDataBuilder, suffix: &str) -> Todo {
    Todo {
        id: 0,
        title: builder.title(suffix),
        description: builder.description(suffix),
        reminder: Some(codec::to_timestamp(&builder.reminder()).unwrap()),
    }
}

async fn create<S: TodoStore>(service: &TodoService<S>, todo: Todo) -> i64 {
    service
        .create(CreateRequest {
            api: API_VERSION.into(),
            todo: Some(todo),
        })
        .await
        .unwrap()
        .id
}

async fn read<S: TodoStore>(service: &TodoService<S>, id: i64) -> TodoResult<Todo> {
    let response = service
        .read(ReadRequest {
            api: API_VERSION.into(),
            id,
        })
        .await?;
    Ok(response.todo.expect("read returns a todo"))
}

async fn delete<S: TodoStore>(service: &TodoService<S>, id: i64) -> TodoResult<i64> {
    Ok(service
        .delete(DeleteRequest {
            api: API_VERSION.into(),
            id,
        })
        .await?
        .deleted)
}

async fn read_all<S: TodoStore>(service: &TodoService<S>) -> TodoResult<Vec<Todo>> {
    Ok(service
        .read_all(ReadAllRequest {
            api: API_VERSION.into(),
        })
        .await?
        .todos)
}

/// Create, read back, delete, then the id is gone
async fn lifecycle<S: TodoStore>(service: &TodoService<S>, builder: &TestDataBuilder) {
    let todo = sample(builder, "main");
    let id = create(service, todo.clone()).await;
    assert_eq!(id, 1);

    let stored = read(service, id).await.unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.title, todo.title);
    assert_eq!(stored.description, todo.description);
    assert_eq!(stored.reminder, todo.reminder);

    assert_eq!(delete(service, id).await.unwrap(), 1);

    let err = read(service, id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Todo with ID='1' is not found");

    let err = delete(service, id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ============================================================================
// SQLite
// ============================================================================

#[tokio::test]
async fn test_lifecycle() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;
    lifecycle(&service, &TestDataBuilder::from_test_name("lifecycle")).await;
}

#[tokio::test]
async fn test_create_without_reminder_reads_back_none() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;
    let builder = TestDataBuilder::from_test_name("no_reminder");

    let id = create(
        &service,
        Todo {
            reminder: None,
            ..sample(&builder, "bare")
        },
    )
    .await;

    assert!(read(&service, id).await.unwrap().reminder.is_none());
}

#[tokio::test]
async fn test_update_existing_and_missing() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;
    let builder = TestDataBuilder::from_test_name("update");

    let id = create(&service, sample(&builder, "before")).await;

    let mut changed = sample(&builder, "after");
    changed.id = id;
    changed.reminder = Some(Timestamp {
        seconds: 1_735_689_600,
        nanos: 0,
    });
    let updated = service
        .update(UpdateRequest {
            api: API_VERSION.into(),
            todo: Some(changed.clone()),
        })
        .await
        .unwrap();
    assert_eq!(updated.updated, 1);
    assert_eq!(read(&service, id).await.unwrap(), changed);

    // A missing id is reported as zero rows, not as an error
    let mut missing = changed;
    missing.id = 999;
    let updated = service
        .update(UpdateRequest {
            api: API_VERSION.into(),
            todo: Some(missing),
        })
        .await
        .unwrap();
    assert_eq!(updated.updated, 0);
}

#[tokio::test]
async fn test_read_all_reflects_creates_and_deletes() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;
    let builder = TestDataBuilder::from_test_name("read_all");

    assert!(read_all(&service).await.unwrap().is_empty());

    let mut ids = Vec::new();
    for suffix in ["a", "b", "c"] {
        ids.push(create(&service, sample(&builder, suffix)).await);
    }
    delete(&service, ids[1]).await.unwrap();

    let mut listed: Vec<i64> = read_all(&service).await.unwrap().iter().map(|t| t.id).collect();
    listed.sort_unstable();
    assert_eq!(listed, vec![ids[0], ids[2]]);
}

#[tokio::test]
async fn test_null_columns_read_as_empty_strings() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;

    sqlx::query("INSERT INTO todo (title, description, reminder) VALUES (NULL, NULL, NULL)")
        .execute(&db.sqlite_pool())
        .await
        .unwrap();

    let todo = read(&service, 1).await.unwrap();
    assert_eq!(todo.title, "");
    assert_eq!(todo.description, "");
    assert!(todo.reminder.is_none());
}

#[tokio::test]
async fn test_undecodable_reminder_fails_read_all() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;
    let builder = TestDataBuilder::from_test_name("garbage");

    create(&service, sample(&builder, "good")).await;
    sqlx::query("INSERT INTO todo (title, description, reminder) VALUES ('bad', 'row', 'not a date')")
        .execute(&db.sqlite_pool())
        .await
        .unwrap();

    let err = read_all(&service).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_table() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;

    let err = service
        .create(CreateRequest {
            api: API_VERSION.into(),
            todo: Some(Todo {
                title: "x".repeat(201),
                ..Default::default()
            }),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = service
        .create(CreateRequest {
            api: "v2".into(),
            todo: Some(Todo::default()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unimplemented);

    assert!(read_all(&service).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_with_bad_reminder_leaves_row_unchanged() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;
    let builder =
        TestDataBuilder::from_test_name("test_update_with_bad_reminder_leaves_row_unchanged");

    let id = create(&service, sample(&builder, "main")).await;
    let original = read(&service, id).await.unwrap();

    let err = service
        .update(UpdateRequest {
            api: API_VERSION.into(),
            todo: Some(Todo {
                id,
                title: builder.title("changed"),
                description: builder.description("changed"),
                reminder: Some(Timestamp {
                    seconds: 0,
                    nanos: 1_000_000_000,
                }),
            }),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert_eq!(read(&service, id).await.unwrap(), original);
}

#[tokio::test]
async fn test_closed_pool_is_unknown() {
    let db = TestDatabase::sqlite().await;
    let service = sqlite_service(&db).await;
    db.sqlite_pool().close().await;

    let err = read_all(&service).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert!(err.to_string().starts_with("Failed to connect to database -> "));
}

// ============================================================================
// Postgres
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_lifecycle_postgres() {
    let db = TestDatabase::postgres().await;
    let store = PgTodoStore::new(db.pg_pool());
    store.ensure_schema().await.unwrap();
    // Bootstrapping twice is a no-op
    store.ensure_schema().await.unwrap();

    let service = TodoService::new(store);
    lifecycle(&service, &TestDataBuilder::from_test_name("lifecycle_postgres")).await;
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_postgres() {
    let db = TestDatabase::postgres().await;
    let store = PgTodoStore::new(db.pg_pool());
    store.ensure_schema().await.unwrap();
    let service = TodoService::new(store);

    let updated = service
        .update(UpdateRequest {
            api: API_VERSION.into(),
            todo: Some(Todo {
                id: 42,
                title: "ghost".into(),
                ..Default::default()
            }),
        })
        .await
        .unwrap();
    assert_eq!(updated.updated, 0);
}
