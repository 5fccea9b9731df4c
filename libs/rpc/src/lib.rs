//! Generated protobuf and gRPC bindings for the todo service.
//!
//! Code is produced at build time from `proto/todo/v1/todo.proto`.

pub mod todo {
    pub mod v1 {
        tonic::include_proto!("todo.v1");
    }
}

pub use prost_types::Timestamp;
