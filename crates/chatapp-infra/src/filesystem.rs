//! Data directory resolution.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CHATAPP_DATA_DIR";

/// Resolve the data directory: `$CHATAPP_DATA_DIR`, else `~/.chatapp`,
/// else `./.chatapp`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatapp");
    }

    PathBuf::from(".chatapp")
}
