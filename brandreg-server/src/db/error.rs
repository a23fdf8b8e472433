//! Database error type

use crate::models::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Store settings missing or unusable. Not retried.
    #[error("store configuration error: {0}")]
    Config(String),

    /// Handle requested with no Tokio runtime current.
    #[error("store handle requires a running Tokio runtime")]
    NoRuntime,

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
