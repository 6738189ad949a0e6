//! Platform-aware data storage directory management
//!
//! ## Platform Paths
//!
//! | Type | Windows | macOS | Linux |
//! |------|---------|-------|-------|
//! | Data | `%APPDATA%\PetCare\` | `~/Library/Application Support/PetCare/` | `$XDG_DATA_HOME/petcare/` |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::config::{AppConfig, DatabaseBackend};
use super::constants::{APP_DOT_FOLDER, APP_NAME};

/// Data subdirectories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSubdir {
    Sqlite,
}

impl DataSubdir {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataSubdir::Sqlite => "sqlite",
        }
    }
}

/// Application storage manager
#[derive(Debug, Clone)]
pub struct AppStorage {
    data_dir: PathBuf,
}

impl AppStorage {
    /// Initialize storage, creating the directories the configured backend needs
    pub async fn init(config: &AppConfig) -> Result<Self> {
        let data_dir = config
            .data_dir
            .clone()
            .unwrap_or_else(Self::resolve_data_dir);

        if config.database.backend == DatabaseBackend::Sqlite {
            let path = data_dir.join(DataSubdir::Sqlite.as_str());
            tokio::fs::create_dir_all(&path).await.with_context(|| {
                format!("Failed to create sqlite directory: {}", path.display())
            })?;
        }

        // Canonicalize only works once the path exists
        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);

        tracing::debug!(data_dir = %data_dir.display(), "Storage initialized");

        Ok(Self { data_dir })
    }

    /// Resolve the platform default data directory
    pub fn resolve_data_dir() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            return proj_dirs.data_dir().to_path_buf();
        }

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        cwd.join(APP_DOT_FOLDER)
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to a file within a subdirectory
    pub fn subdir_path(&self, subdir: DataSubdir, filename: &str) -> PathBuf {
        self.data_dir.join(subdir.as_str()).join(filename)
    }

    /// Create AppStorage for testing with a specific data directory
    #[cfg(test)]
    pub fn init_for_test(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DatabaseConfig, ServerConfig};

    fn config_for(data_dir: PathBuf, backend: DatabaseBackend) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5390,
            },
            database: DatabaseConfig { backend },
            data_dir: Some(data_dir),
            debug: false,
        }
    }

    #[test]
    fn test_data_subdir_as_str() {
        assert_eq!(DataSubdir::Sqlite.as_str(), "sqlite");
    }

    #[test]
    fn test_resolve_data_dir_not_empty() {
        let path = AppStorage::resolve_data_dir();
        assert!(!path.as_os_str().is_empty());
    }

    #[tokio::test]
    async fn test_init_creates_sqlite_dir() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("data");
        let storage = AppStorage::init(&config_for(root.clone(), DatabaseBackend::Sqlite))
            .await
            .unwrap();

        assert!(root.join("sqlite").is_dir());
        assert!(
            storage
                .subdir_path(DataSubdir::Sqlite, "petcare.db")
                .ends_with("sqlite/petcare.db")
        );
    }

    #[tokio::test]
    async fn test_init_memory_backend_creates_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("data");
        AppStorage::init(&config_for(root.clone(), DatabaseBackend::Memory))
            .await
            .unwrap();

        assert!(!root.exists());
    }
}
