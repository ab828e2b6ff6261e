//! TranscriptRepository trait definition.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition), the same
//! pattern as the provider port.

use loglens_types::chat::{ChatTurn, TurnRole};
use loglens_types::error::RepositoryError;

/// Append-only store of chat turns.
///
/// Implementations live in loglens-infra (e.g., `SqliteTranscriptRepository`).
/// There is deliberately no update, delete, or filtered read.
pub trait TranscriptRepository: Send + Sync {
    /// Durably write one turn. The write is committed before this returns.
    fn append(
        &self,
        role: TurnRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<ChatTurn, RepositoryError>> + Send;

    /// Every turn, ordered by primary key (insertion order).
    fn read_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatTurn>, RepositoryError>> + Send;

    /// Total number of stored turns.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
