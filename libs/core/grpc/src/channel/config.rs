use std::time::Duration;
use tonic::transport::Endpoint;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);
const KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(10);
const WINDOW_SIZE: u32 = 1024 * 1024; // 1MB

/// Deadlines for outgoing gRPC channels.
///
/// HTTP/2 keepalive pings, 1MB adaptive flow-control windows and
/// `TCP_NODELAY` are always on; only the deadlines vary between callers.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
  /// How long `create_channel` waits for the first connection
  pub connect_timeout: Duration,
  /// Per-RPC deadline applied by the channel
  pub request_timeout: Duration,
}

impl Default for ChannelConfig {
  fn default() -> Self {
    Self {
      connect_timeout: Duration::from_secs(5),
      request_timeout: Duration::from_secs(30),
    }
  }
}

impl ChannelConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.connect_timeout = timeout;
    self
  }

  /// Set the deadline for individual RPCs
  ///
  /// # Example
  /// ```ignore
  /// let config = ChannelConfig::new()
  ///     .with_request_timeout(server_config.request_timeout());
  /// ```
  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  pub(crate) fn apply_to_endpoint(&self, endpoint: Endpoint) -> Endpoint {
    endpoint
      .connect_timeout(self.connect_timeout)
      .timeout(self.request_timeout)
      .http2_keep_alive_interval(KEEP_ALIVE_INTERVAL)
      .keep_alive_timeout(KEEP_ALIVE_TIMEOUT)
      .keep_alive_while_idle(true)
      .initial_connection_window_size(WINDOW_SIZE)
      .initial_stream_window_size(WINDOW_SIZE)
      .http2_adaptive_window(true)
      .tcp_nodelay(true)
      .tcp_keepalive(Some(KEEP_ALIVE_INTERVAL))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_deadlines() {
    let config = ChannelConfig::default();
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.request_timeout, Duration::from_secs(30));
  }

  #[test]
  fn test_deadlines_are_overridable() {
    let config = ChannelConfig::new()
      .with_connect_timeout(Duration::from_secs(2))
      .with_request_timeout(Duration::from_secs(120));

    assert_eq!(config.connect_timeout, Duration::from_secs(2));
    assert_eq!(config.request_timeout, Duration::from_secs(120));
  }

  #[test]
  fn test_apply_to_endpoint_keeps_uri() {
    let endpoint = Endpoint::from_static("http://127.0.0.1:50051");
    let endpoint = ChannelConfig::new().apply_to_endpoint(endpoint);
    assert_eq!(endpoint.uri().host(), Some("127.0.0.1"));
    assert_eq!(endpoint.uri().port_u16(), Some(50051));
  }
}
