//! Server initialization and lifecycle management
//!
//! One process runs both halves of the service on a shared shutdown
//! trigger:
//! - the gRPC server (`todo.v1.TodoService` plus `grpc.health.v1.Health`)
//! - the HTTP/JSON gateway, which forwards to the gRPC server over a lazy channel

use axum::Router;
use axum_helpers::{AppInfo, ShutdownCoordinator, create_app, create_router};
use core_config::database::{DatabaseBackend, DatabaseConfig};
use core_config::tracing::{LogConfig, build_dispatch, install_color_eyre};
use core_config::{Environment, FromEnv, env_parse};
use database::postgres::{self, PostgresConfig};
use database::sqlite::{self, SqliteConfig};
use domain_todos::{
    PgTodoStore, SqliteTodoStore, TodoApiDoc, TodoService, TodoStore, gateway_client, todo_router,
};
use eyre::{Result, WrapErr};
use grpc_client::server::{
    GrpcServer, RequestLogLayer, ServerConfig as GrpcConfig, create_health_service,
};
use grpc_client::{ChannelConfig, create_channel_lazy_with_config};
use rpc::todo::v1::todo_service_server::{SERVICE_NAME, TodoServiceServer};
use tonic::codec::CompressionEncoding;
use tonic::service::Routes;
use tonic::transport::Server;
use tonic_health::server::HealthReporter;
use tower::layer::util::{Identity, Stack};
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, info};

use crate::service::TodoServiceImpl;

/// tonic router with the per-call logging layer applied
pub type GrpcRouter = tonic::transport::server::Router<Stack<RequestLogLayer, Identity>>;

/// Run both servers until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns an error if:
/// - configuration is missing or malformed
/// - the database cannot be reached or the schema cannot be created
/// - either server fails to bind or stops with an error
pub async fn run() -> Result<()> {
    install_color_eyre();

    let log_config = LogConfig::from_env().wrap_err("Failed to load logging configuration")?;
    let dispatch = build_dispatch(&Environment::from_env(), &log_config);

    start(dispatch.clone()).with_subscriber(dispatch).await
}

async fn start(dispatch: Dispatch) -> Result<()> {
    let db_config = DatabaseConfig::from_env().wrap_err("Failed to load database configuration")?;
    let backend = db_config.backend().wrap_err("Unsupported DATABASE_URL")?;

    info!(backend = ?backend, "Connecting to database...");
    match backend {
        DatabaseBackend::Postgres => {
            let config = PostgresConfig::from_env()
                .wrap_err("Failed to load PostgreSQL configuration")?;
            let pool = postgres::connect_from_config_with_retry(&config, None)
                .await
                .wrap_err("Failed to connect to database")?;
            database::check_health(&pool)
                .await
                .wrap_err("Database health check failed")?;
            serve(PgTodoStore::new(pool), dispatch).await
        }
        DatabaseBackend::Sqlite => {
            let config = SqliteConfig::from_env().wrap_err("Failed to load SQLite configuration")?;
            let pool = sqlite::connect_from_config_with_retry(&config, None)
                .await
                .wrap_err("Failed to open database")?;
            database::check_health(&pool)
                .await
                .wrap_err("Database health check failed")?;
            serve(SqliteTodoStore::new(pool), dispatch).await
        }
    }
}

async fn serve<S>(store: S, dispatch: Dispatch) -> Result<()>
where
    S: TodoStore + 'static,
{
    let grpc_config = GrpcConfig::from_env().wrap_err("Failed to load gRPC configuration")?;
    let http_config = core_config::server::ServerConfig::from_env()
        .wrap_err("Failed to load HTTP configuration")?;

    let bootstrap_schema: bool = env_parse("DB_BOOTSTRAP_SCHEMA", "true")?;
    if bootstrap_schema {
        store
            .ensure_schema()
            .await
            .wrap_err("Failed to create the todo table")?;
        info!("Schema ready");
    }

    let addr = grpc_config
        .socket_addr()
        .wrap_err_with(|| format!("Failed to parse server address: {}", grpc_config.addr_string()))?;
    let (health_reporter, grpc) =
        grpc_router(TodoService::new(store), &grpc_config, dispatch.clone()).await;
    let gateway = gateway_router(&grpc_config, dispatch.clone())?;

    // Probes see NOT_SERVING while in-flight calls drain
    let coordinator = ShutdownCoordinator::new();
    tokio::spawn({
        let coordinator = coordinator.clone();
        async move {
            coordinator.wait_for_signal().await;
            GrpcServer::mark_not_serving(&health_reporter, &[SERVICE_NAME]).await;
        }
        .with_subscriber(dispatch)
    });

    GrpcServer::log_startup(&grpc_config, SERVICE_NAME);
    let grpc_server = async {
        grpc.serve_with_shutdown(addr, coordinator.shutdown_future())
            .await
            .wrap_err("gRPC server failed")
    };
    let http_server = async {
        create_app(gateway, &http_config, coordinator.shutdown_future())
            .await
            .wrap_err("HTTP gateway failed")
    };

    tokio::try_join!(grpc_server, http_server)?;

    info!("Shutdown complete");
    Ok(())
}

/// Build the tonic router: health service plus the todo service, with the
/// request timeout, message limits and (optionally) zstd applied.
pub async fn grpc_router<S>(
    service: TodoService<S>,
    config: &GrpcConfig,
    dispatch: Dispatch,
) -> (HealthReporter, GrpcRouter)
where
    S: TodoStore + 'static,
{
    let (health_reporter, health_service) = create_health_service();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;

    let mut todo_service = TodoServiceServer::new(TodoServiceImpl::new(service))
        .max_decoding_message_size(config.max_decoding_message_size)
        .max_encoding_message_size(config.max_encoding_message_size);
    if config.enable_compression {
        todo_service = todo_service
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    let routes = Routes::new(health_service).add_service(todo_service);
    let router = Server::builder()
        .timeout(config.request_timeout())
        .layer(RequestLogLayer::new(dispatch))
        .add_routes(routes);

    (health_reporter, router)
}

/// HTTP/JSON gateway in front of the gRPC server described by `config`
pub fn gateway_router(config: &GrpcConfig, dispatch: Dispatch) -> Result<Router> {
    let uri = config
        .client_uri()
        .wrap_err_with(|| format!("Failed to parse server address: {}", config.addr_string()))?;
    let channel = create_channel_lazy_with_config(
        uri,
        ChannelConfig::new().with_request_timeout(config.request_timeout()),
    )
    .wrap_err("Failed to create gateway channel")?;

    let client = gateway_client(channel, config.enable_compression);
    let app = AppInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    };

    Ok(create_router::<TodoApiDoc>(todo_router(client), app, dispatch))
}
