//! # gRPC plumbing
//!
//! Shared pieces for serving and calling gRPC services:
//!
//! - **Channels**: HTTP/2 tuned client channels, eager or lazy
//! - **Interceptors**: request id propagation on outgoing calls
//! - **Server**: bind configuration, health reporting, per-call logging layer
//!
//! ## Quick Start
//!
//! ### Client
//! ```ignore
//! use grpc_client::{create_channel_lazy, TracingInterceptor};
//! use rpc::todo::v1::todo_service_client::TodoServiceClient;
//!
//! let channel = create_channel_lazy("http://127.0.0.1:9090")?;
//! let client = TodoServiceClient::with_interceptor(channel, TracingInterceptor::new());
//! ```
//!
//! ### Server
//! ```ignore
//! use grpc_client::server::{GrpcServer, RequestLogLayer, ServerConfig};
//! use rpc::todo::v1::todo_service_server::SERVICE_NAME;
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = grpc_client::server::create_health_service();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//!
//! tonic::transport::Server::builder()
//!     .layer(RequestLogLayer::new(dispatch))
//!     .add_service(health_service)
//!     .add_service(service)
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

pub mod channel;
pub mod error;
pub mod interceptors;
pub mod server;

pub use channel::{
  ChannelConfig, create_channel, create_channel_lazy, create_channel_lazy_with_config,
  create_channel_with_config,
};
pub use error::{GrpcError, GrpcResult, ToTonicResponse};
pub use interceptors::{REQUEST_ID_HEADER, TracingInterceptor};
