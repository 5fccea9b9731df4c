use std::time::Duration;
use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors that can occur during gRPC channel and server setup
#[derive(Error, Debug)]
pub enum GrpcError {
  /// Invalid URI provided for connection
  #[error("Invalid URI: {0}")]
  InvalidUri(#[from] tonic::transport::Error),

  /// Failed to establish connection
  #[error("Connection failed: {0}")]
  ConnectionFailed(tonic::transport::Error),

  /// Connection timeout
  #[error("Connection timeout after {0:?}")]
  ConnectionTimeout(Duration),

  /// Invalid configuration
  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),
}

impl From<GrpcError> for tonic::Status {
  fn from(err: GrpcError) -> Self {
    match err {
      GrpcError::InvalidUri(_) | GrpcError::InvalidConfig(_) => {
        tonic::Status::invalid_argument(err.to_string())
      }
      GrpcError::ConnectionFailed(_) | GrpcError::ConnectionTimeout(_) => {
        tonic::Status::unavailable(err.to_string())
      }
    }
  }
}

impl From<core_config::ConfigError> for GrpcError {
  fn from(err: core_config::ConfigError) -> Self {
    GrpcError::InvalidConfig(err.to_string())
  }
}

/// Extension trait turning a domain result into a unary gRPC reply
///
/// Any error type with a `tonic::Status` conversion works, so service
/// implementations can stay one-liners.
///
/// # Example
/// ```ignore
/// use grpc_client::ToTonicResponse;
///
/// async fn read(&self, request: Request<ReadRequest>) -> Result<Response<ReadResponse>, Status> {
///     self.service.read(request.into_inner()).await.into_response()
/// }
/// ```
pub trait ToTonicResponse<T> {
  fn into_response(self) -> Result<tonic::Response<T>, tonic::Status>;
}

impl<T, E> ToTonicResponse<T> for Result<T, E>
where
  E: Into<tonic::Status>,
{
  fn into_response(self) -> Result<tonic::Response<T>, tonic::Status> {
    self.map(tonic::Response::new).map_err(Into::into)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_config_maps_to_invalid_argument() {
    let status = tonic::Status::from(GrpcError::InvalidConfig("port".into()));
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
    assert_eq!(status.message(), "Invalid configuration: port");
  }

  #[test]
  fn test_timeout_maps_to_unavailable() {
    let status = tonic::Status::from(GrpcError::ConnectionTimeout(Duration::from_secs(5)));
    assert_eq!(status.code(), tonic::Code::Unavailable);
  }

  #[test]
  fn test_into_response() {
    let ok: Result<u32, tonic::Status> = Ok(7);
    assert_eq!(ok.into_response().unwrap().into_inner(), 7);

    let err: Result<u32, GrpcError> = Err(GrpcError::InvalidConfig("x".into()));
    let status = err.into_response().unwrap_err();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
  }
}
