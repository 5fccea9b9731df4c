//! Per-call logging for tonic servers.
//!
//! The layer carries its own [`Dispatch`], so every event emitted while a
//! call is served (including the handler's own) goes to that subscriber
//! whether or not a global default is installed.

use futures::future::BoxFuture;
use std::fmt::Display;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::Dispatch;
use tracing::instrument::WithSubscriber;

use crate::interceptors::REQUEST_ID_HEADER;

#[derive(Clone, Debug)]
pub struct RequestLogLayer {
    dispatch: Dispatch,
}

impl RequestLogLayer {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLog<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLog {
            inner,
            dispatch: self.dispatch.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RequestLog<S> {
    inner: S,
    dispatch: Dispatch,
}

/// Status of a unary reply. Errors travel in the headers ("trailers-only");
/// a successful reply carries its status in the trailers, so no status in
/// the headers means `Ok`.
pub(crate) fn response_code(headers: &http::HeaderMap) -> tonic::Code {
    tonic::Status::from_header_map(headers)
        .map(|status| status.code())
        .unwrap_or(tonic::Code::Ok)
}

impl<S, ReqBody, ResBody> Service<http::Request<ReqBody>> for RequestLog<S>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Display,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<ReqBody>) -> Self::Future {
        let method = request.uri().path().to_owned();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        let response = self.inner.call(request);

        Box::pin(
            async move {
                let start = Instant::now();
                tracing::debug!(method = %method, request_id = %request_id, "gRPC call started");

                let result = response.await;
                let elapsed_ms = start.elapsed().as_millis() as u64;

                match &result {
                    Ok(response) => {
                        let code = response_code(response.headers());
                        if code == tonic::Code::Ok {
                            tracing::info!(method = %method, request_id = %request_id, code = ?code, elapsed_ms, "gRPC call completed");
                        } else {
                            tracing::warn!(method = %method, request_id = %request_id, code = ?code, elapsed_ms, "gRPC call failed");
                        }
                    }
                    Err(e) => {
                        tracing::error!(method = %method, request_id = %request_id, error = %e, elapsed_ms, "gRPC transport error");
                    }
                }

                result
            }
            .with_subscriber(self.dispatch.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;
    use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};

    struct CountEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CountEvents {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: LayerContext<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_dispatch() -> (Dispatch, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry()
            .with(CountEvents(count.clone()))
            .with(tracing_subscriber::filter::LevelFilter::TRACE);
        (Dispatch::new(subscriber), count)
    }

    #[test]
    fn test_response_code() {
        let mut headers = http::HeaderMap::new();
        assert_eq!(response_code(&headers), tonic::Code::Ok);

        headers.insert("grpc-status", http::HeaderValue::from_static("5"));
        assert_eq!(response_code(&headers), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn test_logs_to_own_dispatch() {
        let (dispatch, count) = counting_dispatch();

        let inner = tower::service_fn(|_request: http::Request<()>| async {
            tracing::info!("inside handler");
            let response = http::Response::builder()
                .header("grpc-status", "12")
                .body(())
                .unwrap();
            Ok::<_, Infallible>(response)
        });
        let service = RequestLogLayer::new(dispatch).layer(inner);

        let request = http::Request::builder()
            .uri("/todo.v1.TodoService/Read")
            .header(REQUEST_ID_HEADER, "abc")
            .body(())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert_eq!(response_code(response.headers()), tonic::Code::Unimplemented);
        // started, handler, failed
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
