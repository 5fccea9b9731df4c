//! # Axum Helpers
//!
//! Shared pieces for the HTTP/JSON side of the services.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//! - **[`http`]**: access log middleware
//! - **[`errors`]**: structured JSON error responses with error codes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{AppInfo, ShutdownCoordinator, create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new(), app_info, dispatch);
//! let coordinator = ShutdownCoordinator::new();
//! create_app(router, &ServerConfig::default(), coordinator.shutdown_future()).await?;
//! ```

pub mod errors;
pub mod http;
pub mod server;

pub use server::{
    AppInfo, HealthResponse, ShutdownCoordinator, create_app, create_router, health_router,
    serve_app, shutdown_signal,
};

pub use http::request_logger;

pub use errors::{AppError, ErrorCode, ErrorResponse};
