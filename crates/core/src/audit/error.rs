//! Error type for audit writing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`RotatingAuditWriter`](super::RotatingAuditWriter).
#[derive(Debug, Error)]
pub enum AuditError {
    /// The writer was constructed with unusable settings.
    #[error("invalid audit configuration: {0}")]
    InvalidConfiguration(String),

    /// The record handed to the writer cannot be serialized as a line.
    #[error("invalid audit record: {0}")]
    InvalidRecord(String),

    /// The segment directory or a segment file could not be read or written.
    #[error("audit storage failure at {path}: {source}")]
    StorageFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AuditError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageFailure { path: path.into(), source }
    }

    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::StorageFailure { .. })
    }

    pub fn is_invalid_record(&self) -> bool {
        matches!(self, Self::InvalidRecord(_))
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
