//! Startup logging and health reporting for gRPC servers.

use super::config::ServerConfig;
use tracing::info;

/// Helper for gRPC server startup.
///
/// # Example
///
/// ```ignore
/// use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
/// use rpc::todo::v1::todo_service_server::SERVICE_NAME;
///
/// let (health_reporter, health_service) = create_health_service();
/// GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
/// GrpcServer::log_startup(&config, SERVICE_NAME);
/// ```
pub struct GrpcServer;

impl GrpcServer {
    /// Log server startup information for a single service.
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        Self::log_startup_multiple(config, &[service_name]);
    }

    pub fn log_startup_multiple(config: &ServerConfig, service_names: &[&str]) {
        info!(
            addr = %config.addr_string(),
            services = ?service_names,
            compression = config.enable_compression,
            request_timeout_secs = config.request_timeout_secs,
            "gRPC server starting"
        );
    }

    /// Mark `service_name` and the empty service name (used by generic
    /// probes) as serving.
    pub async fn setup_health(
        health_reporter: &tonic_health::server::HealthReporter,
        service_name: &str,
    ) {
        Self::setup_health_multiple(health_reporter, &[service_name]).await;
    }

    pub async fn setup_health_multiple(
        health_reporter: &tonic_health::server::HealthReporter,
        service_names: &[&str],
    ) {
        for service_name in service_names {
            health_reporter
                .set_service_status(*service_name, tonic_health::ServingStatus::Serving)
                .await;
        }
        health_reporter
            .set_service_status("", tonic_health::ServingStatus::Serving)
            .await;

        info!(services = ?service_names, "Services marked as serving");
    }

    /// Flip everything to not serving ahead of shutdown.
    pub async fn mark_not_serving(
        health_reporter: &tonic_health::server::HealthReporter,
        service_names: &[&str],
    ) {
        for service_name in service_names.iter().copied().chain([""]) {
            health_reporter
                .set_service_status(service_name, tonic_health::ServingStatus::NotServing)
                .await;
        }
    }
}

pub use tonic_health::server::health_reporter as create_health_service;
