use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("Invalid phone format: {0}. It should be 7-15 digits, optional leading +")]
    InvalidPhone(String),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Contact not found: {id}")]
    NotFound { id: String },

    #[error("Empty search")]
    EmptySearch,

    #[error("File doesn't exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported format: expected a JSON object or array, found {0}")]
    UnsupportedFormat(String),

    #[error("Record {index} is not a valid contact: {source}")]
    InvalidRecord {
        index: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ContactResult<T> = Result<T, ContactError>;
