use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Dispatch;
use tracing::instrument::WithSubscriber;

/// Probes carrying this header with [`LIVENESS_PROBE_VALUE`] are not logged.
pub const LIVENESS_PROBE_HEADER: &str = "x-liveness-probe";
pub const LIVENESS_PROBE_VALUE: &str = "Healtz";

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn is_liveness_probe(headers: &HeaderMap) -> bool {
    headers
        .get(LIVENESS_PROBE_HEADER)
        .is_some_and(|value| value == LIVENESS_PROBE_VALUE)
}

/// Access log middleware.
///
/// Everything downstream (including the handlers' own events) is emitted
/// through `dispatch`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .route("/v1/todo/all", get(read_all))
///     .layer(axum::middleware::from_fn_with_state(dispatch, request_logger));
/// ```
pub async fn request_logger(
    State(dispatch): State<Dispatch>,
    request: Request,
    next: Next,
) -> Response {
    if is_liveness_probe(request.headers()) {
        return next.run(request).with_subscriber(dispatch).await;
    }

    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    async move {
        let start = Instant::now();
        tracing::info!(method = %method, uri = %uri, request_id = %request_id, "request started");

        let response = next.run(request).await;

        tracing::info!(
            method = %method,
            uri = %uri,
            request_id = %request_id,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );
        response
    }
    .with_subscriber(dispatch)
    .await
}
