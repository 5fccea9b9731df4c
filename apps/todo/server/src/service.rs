//! Todo gRPC service implementation
//!
//! Thin adapter from the generated `TodoService` trait to the domain
//! [`TodoService`]; domain errors become statuses through
//! [`ToTonicResponse`].

use domain_todos::{TodoService, TodoStore};
use grpc_client::ToTonicResponse;
use rpc::todo::v1::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ReadAllRequest,
    ReadAllResponse, ReadRequest, ReadResponse, UpdateRequest, UpdateResponse,
    todo_service_server::TodoService as TodoRpc,
};
use tonic::{Request, Response, Status};

/// gRPC service implementation for todos
///
/// Generic over the store so the same adapter serves Postgres and SQLite.
pub struct TodoServiceImpl<S>
where
    S: TodoStore + 'static,
{
    service: TodoService<S>,
}

impl<S> TodoServiceImpl<S>
where
    S: TodoStore + 'static,
{
    pub fn new(service: TodoService<S>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S> TodoRpc for TodoServiceImpl<S>
where
    S: TodoStore + 'static,
{
    async fn create(
        &self,
        request: Request<CreateRequest>,
    ) -> Result<Response<CreateResponse>, Status> {
        self.service.create(request.into_inner()).await.into_response()
    }

    async fn read(&self, request: Request<ReadRequest>) -> Result<Response<ReadResponse>, Status> {
        self.service.read(request.into_inner()).await.into_response()
    }

    async fn update(
        &self,
        request: Request<UpdateRequest>,
    ) -> Result<Response<UpdateResponse>, Status> {
        self.service.update(request.into_inner()).await.into_response()
    }

    async fn delete(
        &self,
        request: Request<DeleteRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        self.service.delete(request.into_inner()).await.into_response()
    }

    async fn read_all(
        &self,
        request: Request<ReadAllRequest>,
    ) -> Result<Response<ReadAllResponse>, Status> {
        self.service.read_all(request.into_inner()).await.into_response()
    }
}
