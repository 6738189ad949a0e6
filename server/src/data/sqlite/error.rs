//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The stored initial-schema checksum differs from the embedded schema
    #[error("Database was created by an incompatible schema (stored checksum {stored})")]
    SchemaMismatch { stored: String },

    #[error("No migration is embedded for schema version {0}")]
    UnknownMigration(i32),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },
}

impl SqliteError {
    /// Schema version the error refers to, if any
    pub fn schema_version(&self) -> Option<i32> {
        match self {
            Self::Database(_) => None,
            Self::SchemaMismatch { .. } => Some(1),
            Self::UnknownMigration(version) | Self::MigrationFailed { version, .. } => {
                Some(*version)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_names_stored_checksum() {
        let err = SqliteError::SchemaMismatch {
            stored: "tampered".to_string(),
        };
        assert!(err.to_string().contains("tampered"));
        assert_eq!(err.schema_version(), Some(1));
    }

    #[test]
    fn test_schema_version() {
        assert_eq!(SqliteError::UnknownMigration(4).schema_version(), Some(4));
        assert_eq!(
            SqliteError::Database(sqlx::Error::PoolClosed).schema_version(),
            None
        );
    }
}
