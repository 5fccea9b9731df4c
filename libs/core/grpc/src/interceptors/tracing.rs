use tonic::metadata::MetadataValue;
use tonic::{Request, Status};

/// Metadata key correlating a call across the gateway and the server
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Interceptor for request correlation
///
/// Keeps an `x-request-id` the caller already attached (the HTTP gateway
/// forwards its own) and generates a UUID v4 otherwise.
///
/// # Example
/// ```ignore
/// use grpc_client::interceptors::TracingInterceptor;
/// use rpc::todo::v1::todo_service_client::TodoServiceClient;
///
/// let channel = create_channel_lazy("http://127.0.0.1:9090")?;
/// let client = TodoServiceClient::with_interceptor(channel, TracingInterceptor::new());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TracingInterceptor;

impl TracingInterceptor {
    pub fn new() -> Self {
        Self
    }
}

impl tonic::service::Interceptor for TracingInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let existing = request
            .metadata()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        let request_id = match existing {
            Some(id) => id,
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                let value: MetadataValue<_> = id
                    .parse()
                    .map_err(|_| Status::internal("Failed to create request ID"))?;
                request.metadata_mut().insert(REQUEST_ID_HEADER, value);
                id
            }
        };

        tracing::debug!(
            target: "grpc_client",
            request_id = %request_id,
            "Outgoing gRPC request"
        );

        Ok(request)
    }
}
