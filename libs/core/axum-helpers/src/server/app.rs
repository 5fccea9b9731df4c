use super::health::{AppInfo, health_router};
use crate::errors::handlers::not_found;
use crate::http::request_logger;
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::{Dispatch, info};
use utoipa::OpenApi;

/// Binds the configured address and serves `router` until `shutdown`
/// completes.
///
/// # Example
/// ```ignore
/// let coordinator = ShutdownCoordinator::new();
/// create_app(router, &ServerConfig::from_env()?, coordinator.shutdown_future()).await?;
/// ```
pub async fn create_app<F>(router: Router, server_config: &ServerConfig, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    serve_app(listener, router, shutdown).await
}

/// Same as [`create_app`] on an already bound listener.
pub async fn serve_app<F>(listener: TcpListener, router: Router, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("HTTP server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    info!("HTTP server stopped");
    Ok(())
}

/// Wraps the API routes with the cross-cutting pieces:
///
/// - API routes nested under `/v1`
/// - `/health` liveness endpoint
/// - OpenAPI document at `/api-docs/openapi.json`
/// - `x-request-id` generation (UUID v4) and propagation to the response
/// - access logging through `dispatch`
/// - JSON 404 fallback
pub fn create_router<T>(apis: Router, app: AppInfo, dispatch: Dispatch) -> Router
where
    T: OpenApi + 'static,
{
    let doc = T::openapi();

    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .nest("/v1", apis)
        .merge(health_router(app))
        .fallback(not_found)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::from_fn_with_state(dispatch, request_logger))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
