//! SQLite transcript repository implementation.
//!
//! Implements `TranscriptRepository` from `loglens-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, and one transaction
//! per append.

use loglens_core::transcript::TranscriptRepository;
use loglens_types::chat::{ChatTurn, TurnRole};
use loglens_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `TranscriptRepository`.
#[derive(Clone)]
pub struct SqliteTranscriptRepository {
    pool: DatabasePool,
}

impl SqliteTranscriptRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatTurn.
struct ChatTurnRow {
    id: i64,
    role: String,
    content: String,
}

impl ChatTurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
        })
    }

    fn into_turn(self) -> Result<ChatTurn, RepositoryError> {
        let role: TurnRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatTurn {
            id: self.id,
            role,
            content: self.content,
        })
    }
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection(e.to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

impl TranscriptRepository for SqliteTranscriptRepository {
    async fn append(&self, role: TurnRole, content: &str) -> Result<ChatTurn, RepositoryError> {
        // The transaction rolls back on drop unless committed.
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let result = sqlx::query("INSERT INTO chat_history (role, content) VALUES (?, ?)")
            .bind(role.to_string())
            .bind(content)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        Ok(ChatTurn {
            id: result.last_insert_rowid(),
            role,
            content: content.to_string(),
        })
    }

    async fn read_all(&self) -> Result<Vec<ChatTurn>, RepositoryError> {
        let rows = sqlx::query("SELECT id, role, content FROM chat_history ORDER BY id ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row = ChatTurnRow::from_row(row).map_err(query_error)?;
            turns.push(turn_row.into_turn()?);
        }

        Ok(turns)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM chat_history")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let count: i64 = row.try_get("count").map_err(query_error)?;
        Ok(count as u64)
    }
}
