//! Error types for expandable panel configuration

use thiserror::Error;

/// Errors raised while building expandable panels from configuration
#[derive(Error, Debug)]
pub enum ExpandableError {
    #[error("invalid panel config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("content index {index} out of range ({count} content blocks)")]
    ContentIndex { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, ExpandableError>;
