//! Error types for staffing operations.
//!
//! Missing prerequisite data (no planned interval, no calendar, nobody
//! free) is never an error: it yields an empty result. Errors are reserved
//! for invalid input and for collaborator failures, which are surfaced
//! unchanged.

use chrono::NaiveDateTime;

/// Result type for staffing operations.
pub type StaffingResult<T> = Result<T, StaffingError>;

/// Error type for staffing operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaffingError {
    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Unknown weekly planning: {0}")]
    UnknownPlanning(String),

    #[error("Process line '{line}' of process '{process}' has no work center")]
    MissingWorkCenter { process: String, line: String },

    #[error("Unknown work center: {0}")]
    UnknownWorkCenter(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for StaffingError {
    fn from(err: toml::de::Error) -> Self {
        StaffingError::Config(err.to_string())
    }
}
