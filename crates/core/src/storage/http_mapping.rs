use super::RepositoryError;

/// HTTP status for a failed store call.
///
/// An unreachable store is temporary (503). Anything else means the store
/// answered but the request could not be served (500).
///
/// ```
/// use indicative_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let offline = RepositoryError::ConnectionFailed("timeout".to_string());
/// assert_eq!(repository_error_to_status_code(&offline), 503);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
    }
}
