//! Todo Domain
//!
//! CRUD over a single `todo` table, fronted by a versioned RPC contract.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← version gate, validation, result mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← one statement per call, one pooled connection per call
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← stored rows, validated inputs, gateway DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todos::{SqliteTodoStore, TodoService, TodoStore};
//! use sqlx::SqlitePool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = SqlitePool::connect("sqlite::memory:").await?;
//! let store = SqliteTodoStore::new(pool);
//! store.ensure_schema().await?;
//! let service = TodoService::new(store);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod connection;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod sqlite;
pub mod version;

pub use error::{ErrorKind, TodoError, TodoResult};
pub use handlers::{GatewayClient, TodoApiDoc, gateway_client, status_to_app_error, todo_router};
pub use models::{NewTodo, TodoRecord};
pub use postgres::PgTodoStore;
pub use repository::TodoStore;
pub use service::TodoService;
pub use sqlite::SqliteTodoStore;
pub use version::{API_VERSION, check_api};
