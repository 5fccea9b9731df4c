use crate::error::{TodoError, TodoResult};

/// The one protocol version this service implements
pub const API_VERSION: &str = "v1";

/// Reject requests that ask for a version other than [`API_VERSION`].
///
/// An empty string means "whatever the server implements".
pub fn check_api(requested: &str) -> TodoResult<()> {
    if requested.is_empty() || requested == API_VERSION {
        return Ok(());
    }

    Err(TodoError::Unimplemented {
        expected: API_VERSION,
        requested: requested.to_string(),
    })
}
