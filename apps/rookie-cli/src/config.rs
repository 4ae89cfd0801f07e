//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Where store state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// One JSON file per store under `data_dir`.
    File,
    /// Process memory only; nothing survives the command.
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage: StorageKind,
    pub seed_welcome_post: bool,
    pub anonymous_author: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            storage: StorageKind::File,
            seed_welcome_post: true,
            anonymous_author: "anonymous".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let storage = match env::var("ROOKIE_STORAGE").map(|v| v.to_lowercase()) {
            Ok(v) if v == "memory" => StorageKind::Memory,
            Ok(v) if v != "file" => {
                tracing::warn!(value = %v, "Unknown ROOKIE_STORAGE, using file storage");
                StorageKind::File
            }
            _ => StorageKind::File,
        };

        Self {
            data_dir: env::var("ROOKIE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage,
            seed_welcome_post: env::var("ROOKIE_SEED_WELCOME")
                .map(|v| is_enabled(&v))
                .unwrap_or(defaults.seed_welcome_post),
            anonymous_author: env::var("ROOKIE_ANONYMOUS_AUTHOR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.anonymous_author),
        }
    }

    /// Platform data directory, or `./.rookie` when none can be determined.
    fn default_data_dir() -> PathBuf {
        ProjectDirs::from("com", "rookiehub", "rookie-hub")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".rookie"))
    }
}

/// Boolean env values: `false`, `0`, `no` and `off` disable, in any case.
fn is_enabled(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
