//! HTTP middleware.
//!
//! ```ignore
//! use axum_helpers::http::request_logger;
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn_with_state(dispatch, request_logger));
//! ```

pub mod logging;

pub use logging::{LIVENESS_PROBE_HEADER, LIVENESS_PROBE_VALUE, REQUEST_ID_HEADER, request_logger};
