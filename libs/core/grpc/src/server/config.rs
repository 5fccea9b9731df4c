//! Server configuration loaded from environment variables.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_MAX_MESSAGE_SIZE: usize = 8 * 1024 * 1024; // 8MB

/// Configuration for the gRPC server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: [::1] for IPv6 localhost)
    pub host: String,
    /// Port to listen on (default: 50051)
    pub port: u16,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
    pub max_decoding_message_size: usize,
    pub max_encoding_message_size: usize,
    /// Per-request deadline in seconds (default: 30)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "[::1]".to_string(),
            port: 50051,
            enable_compression: true,
            max_decoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_encoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            request_timeout_secs: 30,
        }
    }
}

impl FromEnv for ServerConfig {
    /// Reads:
    /// - `GRPC_HOST` (default: [::1])
    /// - `GRPC_PORT` (default: 50051)
    /// - `GRPC_COMPRESSION` (default: true)
    /// - `GRPC_MAX_MESSAGE_SIZE` (default: 8388608 / 8MB)
    /// - `GRPC_REQUEST_TIMEOUT_SECS` (default: 30)
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("GRPC_HOST", "[::1]");
        let port = env_parse("GRPC_PORT", "50051")?;
        let compression = env_or_default("GRPC_COMPRESSION", "true");
        let enable_compression = compression != "false" && compression != "0";
        let max_message_size = env_parse("GRPC_MAX_MESSAGE_SIZE", &DEFAULT_MAX_MESSAGE_SIZE.to_string())?;
        let request_timeout_secs = env_parse("GRPC_REQUEST_TIMEOUT_SECS", "30")?;

        Ok(Self {
            host,
            port,
            enable_compression,
            max_decoding_message_size: max_message_size,
            max_encoding_message_size: max_message_size,
            request_timeout_secs,
        })
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_decoding_message_size = size;
        self.max_encoding_message_size = size;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.addr_string().parse()
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URI a local client dials to reach this server. Wildcard binds are
    /// reached through loopback.
    pub fn client_uri(&self) -> Result<String, std::net::AddrParseError> {
        let addr = self.socket_addr()?;
        let ip = match addr.ip() {
            IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(std::net::Ipv6Addr::LOCALHOST),
            ip => ip,
        };
        Ok(format!("http://{}", SocketAddr::new(ip, addr.port())))
    }
}
