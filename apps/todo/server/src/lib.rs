//! Todo service
//!
//! gRPC CRUD service for todos with an HTTP/JSON gateway in front of it.
//!
//! ## Architecture
//!
//! ```text
//! HTTP client            gRPC client
//!   ↓ (JSON, /v1/todo)     │
//! gateway (axum) ──────────┤ (gRPC, zstd)
//!                          ↓
//! TodoServiceImpl (service.rs)
//!   ↓
//! TodoService (domain layer: version gate, validation, mapping)
//!   ↓
//! PgTodoStore | SqliteTodoStore
//! ```
//!
//! ## Modules
//!
//! - `server`: configuration, startup and shutdown of both servers
//! - `service`: gRPC service implementation (TodoServiceImpl)

pub mod server;
pub mod service;

pub use server::{gateway_router, grpc_router, run};
pub use service::TodoServiceImpl;
