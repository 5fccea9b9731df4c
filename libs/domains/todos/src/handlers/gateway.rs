use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_helpers::{AppError, ErrorResponse};
use grpc_client::REQUEST_ID_HEADER;
use rpc::todo::v1::{CreateRequest, DeleteRequest, ReadAllRequest, ReadRequest, UpdateRequest};
use tonic::metadata::MetadataValue;
use tracing::instrument;

use super::GatewayClient;
use super::conversions::{body_to_proto, proto_to_body};
use crate::models::{
    ApiQuery, CreateTodoResponse, DeleteTodoResponse, ReadAllTodoResponse, ReadTodoResponse,
    TodoRequest, UpdateTodoResponse,
};
use crate::version::check_api;

/// RPC outcome to HTTP error
pub fn status_to_app_error(status: tonic::Status) -> AppError {
    let message = status.message().to_string();
    match status.code() {
        tonic::Code::InvalidArgument => AppError::BadRequest(message),
        tonic::Code::NotFound => AppError::NotFound(message),
        tonic::Code::Unimplemented => AppError::NotImplemented(message),
        tonic::Code::Unavailable => AppError::ServiceUnavailable(message),
        tonic::Code::DeadlineExceeded => AppError::GatewayTimeout(message),
        _ => AppError::InternalServerError(message),
    }
}

/// Wrap `message` for the wire, carrying the caller's request id along.
fn rpc_request<T>(headers: &HeaderMap, message: T) -> tonic::Request<T> {
    let mut request = tonic::Request::new(message);
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<MetadataValue<_>>().ok());
    if let Some(value) = request_id {
        request.metadata_mut().insert(REQUEST_ID_HEADER, value);
    }
    request
}

/// An unsupported version is reported ahead of any body error.
fn gate_version(api: &str) -> Result<(), AppError> {
    check_api(api).map_err(|e| status_to_app_error(e.into()))
}

fn bad_path(rejection: PathRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

fn bad_query(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// Create a todo
#[utoipa::path(
    post,
    path = "/v1/todo",
    tag = "todo",
    request_body = TodoRequest,
    responses(
        (status = 201, description = "Todo created", body = CreateTodoResponse),
        (status = 400, description = "Invalid todo", body = ErrorResponse),
        (status = 501, description = "Unsupported API version", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn create_todo(
    State(mut client): State<GatewayClient>,
    headers: HeaderMap,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    gate_version(&payload.api)?;
    let todo = payload.todo.map(body_to_proto).transpose()?;

    let response = client
        .create(rpc_request(&headers, CreateRequest { api: payload.api, todo }))
        .await
        .map_err(status_to_app_error)?
        .into_inner();

    Ok((
        StatusCode::CREATED,
        Json(CreateTodoResponse {
            api: response.api,
            id: response.id,
        }),
    ))
}

/// Read a todo by id
#[utoipa::path(
    get,
    path = "/v1/todo/{id}",
    tag = "todo",
    params(
        ("id" = i64, Path, description = "Todo id"),
        ApiQuery
    ),
    responses(
        (status = 200, description = "Todo found", body = ReadTodoResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 501, description = "Unsupported API version", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn read_todo(
    State(mut client): State<GatewayClient>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> Result<Json<ReadTodoResponse>, AppError> {
    let Path(id) = id.map_err(bad_path)?;
    let Query(query) = query.map_err(bad_query)?;

    let response = client
        .read(rpc_request(&headers, ReadRequest { api: query.api, id }))
        .await
        .map_err(status_to_app_error)?
        .into_inner();

    let todo = response
        .todo
        .map(proto_to_body)
        .transpose()?
        .ok_or_else(|| AppError::InternalServerError(format!("Todo with ID='{}' came back empty", id)))?;

    Ok(Json(ReadTodoResponse {
        api: response.api,
        todo,
    }))
}

/// Replace a todo's fields. The path id wins over any id in the body.
#[utoipa::path(
    put,
    path = "/v1/todo/{id}",
    tag = "todo",
    params(("id" = i64, Path, description = "Todo id")),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Number of rows updated (0 when the id does not exist)", body = UpdateTodoResponse),
        (status = 400, description = "Invalid todo", body = ErrorResponse),
        (status = 501, description = "Unsupported API version", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn update_todo(
    State(mut client): State<GatewayClient>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<Json<UpdateTodoResponse>, AppError> {
    let Path(id) = id.map_err(bad_path)?;
    let Json(payload) = payload?;
    gate_version(&payload.api)?;

    let todo = payload
        .todo
        .map(|mut body| {
            body.id = id;
            body_to_proto(body)
        })
        .transpose()?;

    let response = client
        .update(rpc_request(&headers, UpdateRequest { api: payload.api, todo }))
        .await
        .map_err(status_to_app_error)?
        .into_inner();

    Ok(Json(UpdateTodoResponse {
        api: response.api,
        updated: response.updated,
    }))
}

/// Delete a todo by id
#[utoipa::path(
    delete,
    path = "/v1/todo/{id}",
    tag = "todo",
    params(
        ("id" = i64, Path, description = "Todo id"),
        ApiQuery
    ),
    responses(
        (status = 200, description = "Todo deleted", body = DeleteTodoResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 501, description = "Unsupported API version", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn delete_todo(
    State(mut client): State<GatewayClient>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> Result<Json<DeleteTodoResponse>, AppError> {
    let Path(id) = id.map_err(bad_path)?;
    let Query(query) = query.map_err(bad_query)?;

    let response = client
        .delete(rpc_request(&headers, DeleteRequest { api: query.api, id }))
        .await
        .map_err(status_to_app_error)?
        .into_inner();

    Ok(Json(DeleteTodoResponse {
        api: response.api,
        deleted: response.deleted,
    }))
}

/// List every todo
#[utoipa::path(
    get,
    path = "/v1/todo/all",
    tag = "todo",
    params(ApiQuery),
    responses(
        (status = 200, description = "All todos", body = ReadAllTodoResponse),
        (status = 500, description = "A stored row could not be read", body = ErrorResponse),
        (status = 501, description = "Unsupported API version", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn read_all_todos(
    State(mut client): State<GatewayClient>,
    headers: HeaderMap,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> Result<Json<ReadAllTodoResponse>, AppError> {
    let Query(query) = query.map_err(bad_query)?;

    let response = client
        .read_all(rpc_request(&headers, ReadAllRequest { api: query.api }))
        .await
        .map_err(status_to_app_error)?
        .into_inner();

    let todos = response
        .todos
        .into_iter()
        .map(proto_to_body)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ReadAllTodoResponse {
        api: response.api,
        todos,
    }))
}
