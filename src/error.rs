//! Error types for hyd
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task, broken config)
//! - 3: Validation rejected (create/edit with missing or invalid fields)
//! - 4: Operation failed (I/O, serialization)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the hyd CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const VALIDATION_REJECTED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for hyd operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    // Validation rejections (exit code 3)
    #[error("Validation failed: missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Validation failed: {0}")]
    InvalidField(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Store unreadable: {0}")]
    StoreUnreadable(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidConfig(_) | Error::InvalidArgument(_) | Error::TaskNotFound(_) => {
                exit_codes::USER_ERROR
            }

            // Validation rejections
            Error::MissingFields(_) | Error::InvalidField(_) => exit_codes::VALIDATION_REJECTED,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::StoreUnreadable(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for the JSON error envelope, when the error
    /// carries more than its message.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::MissingFields(fields) => Some(serde_json::json!({ "missing": fields })),
            Error::TaskNotFound(id) => Some(serde_json::json!({ "task_id": id })),
            _ => None,
        }
    }
}

/// Result type alias for hyd operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_taxonomy() {
        assert_eq!(
            Error::TaskNotFound("TK099".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::MissingFields(vec!["hydrant_id".to_string()]).exit_code(),
            exit_codes::VALIDATION_REJECTED
        );
        assert_eq!(
            Error::OperationFailed("disk full".to_string()).exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }

    #[test]
    fn missing_fields_lists_names_in_message() {
        let err = Error::MissingFields(vec!["hydrant_id".to_string(), "description".to_string()]);
        let text = err.to_string();
        assert!(text.contains("hydrant_id"));
        assert!(text.contains("description"));
        let details = err.details().expect("details");
        assert_eq!(details["missing"][1], "description");
    }
}
