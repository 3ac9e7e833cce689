//! Error types for catalog operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("unknown course '{0}'")]
    UnknownCourse(String),

    #[error("course '{0}' already exists")]
    DuplicateCourse(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
