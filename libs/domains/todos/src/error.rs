use std::error::Error as StdError;
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Machine-readable failure category, one per RPC status code the service emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Unimplemented,
    Unknown,
}

#[derive(Debug, Error)]
pub enum TodoError {
    #[error(
        "Unsupported API version: service implements API version '{expected}', but asked for '{requested}'"
    )]
    Unimplemented {
        expected: &'static str,
        requested: String,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Todo with ID='{0}' is not found")]
    NotFound(i64),

    /// Storage or infrastructure failure. `message` already embeds the cause
    /// as `"<context> -> <cause>"`; the cause itself stays reachable through
    /// `source()`.
    #[error("{message}")]
    Unknown {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

pub type TodoResult<T> = Result<T, TodoError>;

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Unimplemented { .. } => ErrorKind::Unimplemented,
            TodoError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            TodoError::NotFound(_) => ErrorKind::NotFound,
            TodoError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Wrap a lower-level failure with context
    pub fn unknown(context: &str, cause: impl Into<BoxError>) -> Self {
        let cause = cause.into();
        TodoError::Unknown {
            message: format!("{} -> {}", context, cause),
            source: Some(cause),
        }
    }

    /// An integrity problem with no underlying error to wrap
    pub fn anomaly(message: impl Into<String>) -> Self {
        TodoError::Unknown {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_argument(context: &str, cause: impl std::fmt::Display) -> Self {
        TodoError::InvalidArgument(format!("{} -> {}", context, cause))
    }
}

impl From<ErrorKind> for tonic::Code {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument => tonic::Code::InvalidArgument,
            ErrorKind::NotFound => tonic::Code::NotFound,
            ErrorKind::Unimplemented => tonic::Code::Unimplemented,
            ErrorKind::Unknown => tonic::Code::Unknown,
        }
    }
}

impl From<TodoError> for tonic::Status {
    fn from(err: TodoError) -> Self {
        tonic::Status::new(err.kind().into(), err.to_string())
    }
}
