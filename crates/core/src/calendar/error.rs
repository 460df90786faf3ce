use thiserror::Error;

/// Errors that can occur when parsing calendar inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
}
