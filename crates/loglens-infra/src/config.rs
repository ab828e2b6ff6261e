//! Server configuration loader for LogLens.
//!
//! Reads `config.toml` from the data directory (`~/.loglens/` in production)
//! and deserializes it into [`ServerConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies `LOGLENS_*` environment
//! overrides on top.

use std::path::{Path, PathBuf};

use loglens_types::config::ServerConfig;

use crate::sqlite::pool::default_database_url;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LOGLENS_DATA_DIR";
/// Environment variable overriding `[database] url`.
pub const DATABASE_URL_ENV: &str = "LOGLENS_DATABASE_URL";
/// Environment variable overriding `[llm] base_url`.
pub const LLM_BASE_URL_ENV: &str = "LOGLENS_LLM_BASE_URL";
/// Environment variable overriding `[llm] model`.
pub const LLM_MODEL_ENV: &str = "LOGLENS_LLM_MODEL";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `LOGLENS_DATA_DIR` environment variable
/// 2. `~/.loglens`
/// 3. `.loglens` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".loglens");
    }

    PathBuf::from(".loglens")
}

/// Load server configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> ServerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

/// Apply `LOGLENS_*` overrides using `lookup` to read variables.
///
/// Empty values are ignored.
pub fn apply_overrides(
    mut config: ServerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ServerConfig {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(DATABASE_URL_ENV) {
        config.database.url = Some(url);
    }
    if let Some(base_url) = get(LLM_BASE_URL_ENV) {
        config.llm.base_url = base_url;
    }
    if let Some(model) = get(LLM_MODEL_ENV) {
        config.llm.model = model;
    }
    config
}

/// Load `config.toml` and apply overrides from the process environment.
pub async fn load_config_with_env(data_dir: &Path) -> ServerConfig {
    let config = load_config(data_dir).await;
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Database URL to open: the configured one, or the default file in `data_dir`.
pub fn database_url(config: &ServerConfig, data_dir: &Path) -> String {
    config
        .database
        .url
        .clone()
        .unwrap_or_else(|| default_database_url(data_dir))
}
