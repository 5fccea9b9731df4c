//! gRPC server helpers: bind configuration, health reporting and
//! per-call logging.
//!
//! ```ignore
//! use grpc_client::server::{GrpcServer, RequestLogLayer, ServerConfig, create_health_service};
//! use rpc::todo::v1::todo_service_server::{TodoServiceServer, SERVICE_NAME};
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = create_health_service();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! Server::builder()
//!     .timeout(config.request_timeout())
//!     .layer(RequestLogLayer::new(dispatch))
//!     .add_service(health_service)
//!     .add_service(TodoServiceServer::new(service))
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

mod builder;
mod config;
mod logging;

pub use builder::{GrpcServer, create_health_service};
pub use config::ServerConfig;
pub use logging::{RequestLog, RequestLogLayer};
