//! HTTP server setup: router assembly, health endpoint, graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{AppInfo, ShutdownCoordinator, create_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, app_info, dispatch);
//! let coordinator = ShutdownCoordinator::new();
//! create_app(router, &ServerConfig::default(), coordinator.shutdown_future()).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router, serve_app};
pub use health::{AppInfo, HealthResponse, health_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
