pub mod config;

pub use config::ChannelConfig;

use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

fn endpoint(addr: &str, config: ChannelConfig) -> GrpcResult<Endpoint> {
  let endpoint = Endpoint::from_shared(addr.to_owned()).map_err(|e| {
    tracing::error!(target: "grpc_client", addr = %addr, error = ?e, "Invalid URI");
    GrpcError::InvalidUri(e)
  })?;

  Ok(config.apply_to_endpoint(endpoint))
}

/// Creates a gRPC channel with the default tuning and waits for the
/// connection.
///
/// ## Example
/// ```ignore
/// use grpc_client::create_channel;
/// use rpc::todo::v1::todo_service_client::TodoServiceClient;
///
/// let channel = create_channel("http://127.0.0.1:9090").await?;
/// let client = TodoServiceClient::new(channel);
/// ```
pub async fn create_channel(addr: impl Into<String>) -> GrpcResult<Channel> {
  create_channel_with_config(addr, ChannelConfig::default()).await
}

/// Creates a gRPC channel with custom configuration and waits for the
/// connection.
pub async fn create_channel_with_config(
  addr: impl Into<String>,
  config: ChannelConfig,
) -> GrpcResult<Channel> {
  let addr = addr.into();
  let connect_timeout = config.connect_timeout;
  let endpoint = endpoint(&addr, config)?;

  tracing::debug!(target: "grpc_client", addr = %addr, "Creating gRPC channel");

  match tokio::time::timeout(connect_timeout, endpoint.connect()).await {
    Ok(Ok(channel)) => Ok(channel),
    Ok(Err(e)) => {
      tracing::error!(
        target: "grpc_client",
        addr = %addr,
        error = ?e,
        "Failed to connect to gRPC service"
      );
      Err(GrpcError::ConnectionFailed(e))
    }
    Err(_) => Err(GrpcError::ConnectionTimeout(connect_timeout)),
  }
}

/// Creates a lazy gRPC channel that connects on first request
///
/// Returns immediately. A dropped connection is re-established on the next
/// call, so a gateway can start before the server it talks to.
pub fn create_channel_lazy(addr: impl Into<String>) -> GrpcResult<Channel> {
  create_channel_lazy_with_config(addr, ChannelConfig::default())
}

/// Creates a lazy gRPC channel with custom configuration
pub fn create_channel_lazy_with_config(
  addr: impl Into<String>,
  config: ChannelConfig,
) -> GrpcResult<Channel> {
  let addr = addr.into();
  let endpoint = endpoint(&addr, config)?;

  tracing::debug!(
    target: "grpc_client",
    addr = %addr,
    "Creating lazy gRPC channel (connects on first request)"
  );

  Ok(endpoint.connect_lazy())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[tokio::test]
  async fn test_invalid_uri() {
    let result = create_channel("not a valid uri").await;
    assert!(matches!(result, Err(GrpcError::InvalidUri(_))));
  }

  #[tokio::test]
  async fn test_lazy_invalid_uri() {
    let result = create_channel_lazy("not a valid uri");
    assert!(matches!(result, Err(GrpcError::InvalidUri(_))));
  }

  #[tokio::test]
  async fn test_lazy_does_not_connect() {
    // Nothing listens here; a lazy channel must still be created
    assert!(create_channel_lazy("http://127.0.0.1:1").is_ok());
  }

  #[tokio::test]
  async fn test_connection_refused() {
    let config = ChannelConfig::new().with_connect_timeout(Duration::from_secs(2));
    let result = create_channel_with_config("http://127.0.0.1:1", config).await;
    assert!(matches!(
      result,
      Err(GrpcError::ConnectionFailed(_)) | Err(GrpcError::ConnectionTimeout(_))
    ));
  }
}
