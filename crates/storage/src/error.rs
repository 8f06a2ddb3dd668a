use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("store did not respond within {0:?}")]
    Timeout(Duration),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// The fixed set of failure kinds a store error is reported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    DuplicateKey,
    MissingRequiredField,
    ConstraintViolation,
    Timeout,
    NotFound,
    Other,
}

impl StorageError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::DuplicateKey(_) => FailureKind::DuplicateKey,
            Self::MissingRequiredField(_) => FailureKind::MissingRequiredField,
            Self::ConstraintViolation(_) => FailureKind::ConstraintViolation,
            Self::Timeout(_) => FailureKind::Timeout,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Sqlite(_) | Self::Corrupt(_) => FailureKind::Other,
        }
    }
}
