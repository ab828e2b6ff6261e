//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and HTTP API.
//! `ChatService` is generic over the transcript repository; AppState pins it
//! to the SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use loglens_core::chat::service::ChatService;
use loglens_core::context::LogContext;
use loglens_core::llm::BoxLlmProvider;
use loglens_infra::config::{database_url, load_config_with_env, resolve_data_dir};
use loglens_infra::llm::create_provider;
use loglens_infra::sqlite::pool::DatabasePool;
use loglens_infra::sqlite::transcript::SqliteTranscriptRepository;
use loglens_types::config::ServerConfig;

/// Chat service pinned to the SQLite transcript store.
pub type ConcreteChatService = ChatService<SqliteTranscriptRepository>;

/// Shared application state.
///
/// Cloned into every request; the log context and transcript live behind
/// the `Arc`ed chat service so every clone sees the same slot.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<ServerConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config_with_env(&data_dir).await;

        let db_url = database_url(&config, &data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        let provider = create_provider(&config.llm)?;

        Ok(Self::from_parts(config, data_dir, db_pool, provider))
    }

    /// Wire state from already-built parts.
    pub fn from_parts(
        config: ServerConfig,
        data_dir: PathBuf,
        db_pool: DatabasePool,
        provider: BoxLlmProvider,
    ) -> Self {
        let transcript = SqliteTranscriptRepository::new(db_pool.clone());
        let chat_service = ChatService::new(
            Arc::new(LogContext::new()),
            transcript,
            provider,
            config.llm.model.clone(),
        );

        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        }
    }
}
