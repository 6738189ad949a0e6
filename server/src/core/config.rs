use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT};

// =============================================================================
// Database Backend Enum
// =============================================================================

/// Record store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// Persistent SQLite database in the data directory
    #[default]
    Sqlite,
    /// Process-local tables, discarded on exit
    Memory,
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseBackend::Sqlite => write!(f, "sqlite"),
            DatabaseBackend::Memory => write!(f, "memory"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Database configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// Record store backend: sqlite (default) or memory
    pub backend: Option<DatabaseBackend>,
}

/// Storage configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StorageFileConfig {
    pub data_dir: Option<String>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub storage: Option<StorageFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Layer `other` on top of this config; set fields in `other` win
    fn merge(&mut self, other: FileConfig) {
        self.server = overlay(self.server.take(), other.server, |base, top| {
            ServerFileConfig {
                host: top.host.or(base.host),
                port: top.port.or(base.port),
            }
        });
        self.database = overlay(self.database.take(), other.database, |base, top| {
            DatabaseFileConfig {
                backend: top.backend.or(base.backend),
            }
        });
        self.storage = overlay(self.storage.take(), other.storage, |base, top| {
            StorageFileConfig {
                data_dir: top.data_dir.or(base.data_dir),
            }
        });
        self.debug = other.debug.or(self.debug);
        tracing::trace!(merged = ?self, "Merged config layer");
    }
}

/// Combine two optional config sections field by field
fn overlay<T>(base: Option<T>, top: Option<T>, combine: impl FnOnce(T, T) -> T) -> Option<T> {
    match (base, top) {
        (Some(base), Some(top)) => Some(combine(base, top)),
        (base, top) => top.or(base),
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Explicit data directory; `None` means the platform default
    pub data_dir: Option<PathBuf>,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.petcare/petcare.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let layers = config_layers(cli)?;
        let mut file_config = FileConfig::default();
        for path in &layers {
            let layer = FileConfig::load_from_file(path)?;
            layer.warn_unknown_fields();
            file_config.merge(layer);
        }
        tracing::debug!(configs = ?layers, "Config files loaded");

        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();
        let file_storage = file_config.storage.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);
        let backend = cli
            .database_backend
            .or(file_database.backend)
            .unwrap_or_default();
        let data_dir = cli
            .data_dir
            .as_ref()
            .map(|p| expand_path(&p.to_string_lossy()))
            .or_else(|| file_storage.data_dir.as_deref().map(expand_path));
        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let config = Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig { backend },
            data_dir,
            debug,
        };

        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            backend = %config.database.backend,
            data_dir = ?config.data_dir,
            debug = config.debug,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind a random port the client cannot know
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        Ok(())
    }
}

/// Whether `host` binds every interface
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

/// Config files to read, lowest priority first
///
/// The profile config always applies when present. An explicit `--config`
/// replaces the local `petcare.json` lookup and must exist.
fn config_layers(cli: &CliConfig) -> Result<Vec<PathBuf>> {
    let mut layers: Vec<PathBuf> = get_profile_config_path()
        .filter(|path| path.exists())
        .into_iter()
        .collect();

    match &cli.config {
        Some(path) => {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            layers.push(expanded);
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                layers.push(local);
            }
        }
    }

    Ok(layers)
}

/// Get the profile config path (~/.petcare/petcare.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("[::]"));
        assert!(!is_all_interfaces("127.0.0.1"));
    }

    #[test]
    fn test_database_backend_serde() {
        let backend: DatabaseBackend = serde_json::from_str(r#""memory""#).unwrap();
        assert_eq!(backend, DatabaseBackend::Memory);
        assert_eq!(DatabaseBackend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "server": { "host": "0.0.0.0", "port": 8080 },
            "database": { "backend": "memory" },
            "storage": { "data_dir": "/var/lib/petcare" },
            "debug": true
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        let server = config.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, Some(8080));
        assert_eq!(
            config.database.as_ref().unwrap().backend,
            Some(DatabaseBackend::Memory)
        );
        assert_eq!(
            config.storage.as_ref().unwrap().data_dir.as_deref(),
            Some("/var/lib/petcare")
        );
        assert_eq!(config.debug, Some(true));
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "server": { "host": "localhost" }, "unknown_field": 123 }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config.server.as_ref().unwrap().host.as_deref(),
            Some("localhost")
        );
        assert_eq!(config.extra.get("unknown_field").unwrap(), 123);
    }

    #[test]
    fn test_file_config_merge() {
        let mut base = FileConfig {
            server: Some(ServerFileConfig {
                host: Some("base.host".to_string()),
                port: Some(1000),
            }),
            database: Some(DatabaseFileConfig {
                backend: Some(DatabaseBackend::Sqlite),
            }),
            ..Default::default()
        };
        let overlay = FileConfig {
            server: Some(ServerFileConfig {
                host: None,
                port: Some(2000),
            }),
            database: Some(DatabaseFileConfig {
                backend: Some(DatabaseBackend::Memory),
            }),
            debug: Some(true),
            ..Default::default()
        };

        base.merge(overlay);

        let server = base.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("base.host"));
        assert_eq!(server.port, Some(2000));
        assert_eq!(base.database.unwrap().backend, Some(DatabaseBackend::Memory));
        assert_eq!(base.debug, Some(true));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::load(&CliConfig::default()).unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
        assert!(!config.debug);
    }

    #[test]
    fn test_app_config_cli_override() {
        let cli = CliConfig {
            host: Some("cli.host".to_string()),
            port: Some(3000),
            debug: true,
            database_backend: Some(DatabaseBackend::Memory),
            data_dir: Some(PathBuf::from("/tmp/petcare-test")),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.server.host, "cli.host");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/petcare-test")));
        assert!(config.debug);
    }

    #[test]
    fn test_app_config_config_path_must_exist() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/petcare.json")),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_app_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(
            &path,
            r#"{ "server": { "port": 7070 }, "database": { "backend": "memory" } }"#,
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.server.port, 7070);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
    }

    #[test]
    fn test_app_config_validation_server_port_zero() {
        let cli = CliConfig {
            port: Some(0),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("server.port must be greater than 0"));
    }

    #[test]
    fn test_app_config_validation_empty_host() {
        let cli = CliConfig {
            host: Some(String::new()),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("server.host must not be empty"));
    }
}
