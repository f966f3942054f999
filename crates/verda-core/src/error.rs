use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
