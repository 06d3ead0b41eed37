//! Repository Module
//!
//! Per-table query functions over the SQLite pool. Handlers convert
//! [`RepoError`] into the HTTP-level `AppError`; repositories stay
//! transport-agnostic and take plain values (`i64` millis, ISO date
//! strings).

pub mod attendance;
pub mod member;
pub mod request;

use crate::utils::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// In-memory SQLite pool with the real schema applied, for repository tests.
///
/// max_connections(1): an in-memory database lives per connection, so the
/// pool must never open a second one.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::DbService::migrate(&pool).await.unwrap();
    pool
}
