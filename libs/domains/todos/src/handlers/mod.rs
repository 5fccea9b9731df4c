mod conversions;
mod gateway;

pub use gateway::status_to_app_error;

use axum::{Router, routing::{get, post}};
use grpc_client::TracingInterceptor;
use rpc::todo::v1::todo_service_client::TodoServiceClient;
use tonic::codec::CompressionEncoding;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use utoipa::OpenApi;

use crate::models::{
    CreateTodoResponse, DeleteTodoResponse, ReadAllTodoResponse, ReadTodoResponse, TodoBody,
    TodoRequest, UpdateTodoResponse,
};

/// gRPC client the JSON gateway forwards through
pub type GatewayClient = TodoServiceClient<InterceptedService<Channel, TracingInterceptor>>;

/// Wrap `channel` for the gateway. Replies are always accepted compressed;
/// requests are only compressed when the server is known to accept zstd.
pub fn gateway_client(channel: Channel, send_compressed: bool) -> GatewayClient {
    let client = TodoServiceClient::with_interceptor(channel, TracingInterceptor::new())
        .accept_compressed(CompressionEncoding::Zstd);

    if send_compressed {
        client.send_compressed(CompressionEncoding::Zstd)
    } else {
        client
    }
}

/// OpenAPI documentation for the Todo JSON gateway
#[derive(OpenApi)]
#[openapi(
    paths(
        gateway::create_todo,
        gateway::read_todo,
        gateway::update_todo,
        gateway::delete_todo,
        gateway::read_all_todos,
    ),
    components(
        schemas(
            TodoBody,
            TodoRequest,
            CreateTodoResponse,
            ReadTodoResponse,
            UpdateTodoResponse,
            DeleteTodoResponse,
            ReadAllTodoResponse,
            axum_helpers::ErrorResponse,
        )
    ),
    tags(
        (name = "todo", description = "Todo CRUD, forwarded to the gRPC service")
    )
)]
pub struct TodoApiDoc;

/// Gateway routes, meant to be nested under `/v1`
pub fn todo_router(client: GatewayClient) -> Router {
    Router::new()
        .route("/todo", post(gateway::create_todo))
        .route("/todo/all", get(gateway::read_all_todos))
        .route(
            "/todo/{id}",
            get(gateway::read_todo)
                .put(gateway::update_todo)
                .patch(gateway::update_todo)
                .delete(gateway::delete_todo),
        )
        .with_state(client)
}
