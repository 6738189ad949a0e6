use clap::Parser;

use std::path::PathBuf;

use super::config::DatabaseBackend;
use super::constants::{
    ENV_CONFIG, ENV_DATA_DIR, ENV_DATABASE_BACKEND, ENV_DEBUG, ENV_HOST, ENV_PORT,
};

#[derive(Parser)]
#[command(name = "petcare")]
#[command(version, about = "Pet care records service", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (verbose request logging)
    #[arg(long, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Data directory (databases live under <data-dir>/sqlite)
    #[arg(long, env = ENV_DATA_DIR)]
    pub data_dir: Option<PathBuf>,

    /// Record store backend (sqlite or memory)
    #[arg(long, env = ENV_DATABASE_BACKEND, value_parser = parse_database_backend)]
    pub database_backend: Option<DatabaseBackend>,
}

/// Parse database backend from CLI/env string
fn parse_database_backend(s: &str) -> Result<DatabaseBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(DatabaseBackend::Sqlite),
        "memory" | "mem" => Ok(DatabaseBackend::Memory),
        _ => Err(format!(
            "Invalid database backend '{}'. Valid options: sqlite, memory",
            s
        )),
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub database_backend: Option<DatabaseBackend>,
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    let cli = Cli::parse();
    CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        data_dir: cli.data_dir,
        database_backend: cli.database_backend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_database_backend() {
        assert_eq!(
            parse_database_backend("sqlite").unwrap(),
            DatabaseBackend::Sqlite
        );
        assert_eq!(
            parse_database_backend("MEMORY").unwrap(),
            DatabaseBackend::Memory
        );
        assert!(parse_database_backend("postgres").is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "petcare",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
            "--database-backend",
            "memory",
        ])
        .unwrap();

        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.database_backend, Some(DatabaseBackend::Memory));
        assert!(!cli.debug);
    }
}
