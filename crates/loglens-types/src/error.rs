use thiserror::Error;

/// Errors from repository operations (used by trait definitions in loglens-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}
