//! Repository error types.

use lifeplan_core::store::StoreError;
use sea_orm::DbErr;

/// Errors raised by the repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A stored row holds a value the domain does not accept.
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Corrupt(msg) => Self::Corrupt(msg),
            RepositoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}
