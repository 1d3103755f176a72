//! Configuration loader for chatapp.
//!
//! Reads `config.toml` from the data directory (`~/.chatapp/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use chatapp_types::config::AppConfig;

use crate::sqlite::pool::default_database_url;

/// Environment variable overriding the database URL.
pub const DATABASE_URL_ENV: &str = "CHATAPP_DATABASE_URL";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve the database URL.
///
/// Priority: `$CHATAPP_DATABASE_URL`, then `[database] url` from the config,
/// then `chatapp.db` inside the data directory.
pub fn resolve_database_url(config: &AppConfig, data_dir: &Path) -> String {
    resolve_database_url_with(std::env::var(DATABASE_URL_ENV).ok(), config, data_dir)
}

fn resolve_database_url_with(env_url: Option<String>, config: &AppConfig, data_dir: &Path) -> String {
    env_url
        .filter(|u| !u.trim().is_empty())
        .or_else(|| config.database.url.clone())
        .unwrap_or_else(|| default_database_url(data_dir))
}
