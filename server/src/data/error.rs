//! Unified error type for the data layer
//!
//! Backend-specific errors convert into [`DataError`] while keeping the name
//! of the backend that raised them.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// Migration failed
    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    /// A row addressed by id does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

}

impl DataError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    /// Create a migration failed error
    pub fn migration_failed(backend: &'static str, version: i32, name: &str, error: &str) -> Self {
        Self::MigrationFailed {
            backend,
            version,
            name: name.to_string(),
            error: error.to_string(),
        }
    }

    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::MigrationFailed { backend, .. } => backend,
            Self::NotFound { .. } => "unknown",
        }
    }
}

/// Convert from the SQLite service error type
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        use crate::data::sqlite::SqliteError;

        match e {
            SqliteError::Database(e) => Self::Sqlite(e),
            SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::migration_failed("sqlite", version, &name, &error),
            other => Self::migration_failed(
                "sqlite",
                other.schema_version().unwrap_or_default(),
                "schema_check",
                &other.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteError;

    #[test]
    fn test_migration_failed_error_display() {
        let err = DataError::migration_failed("sqlite", 2, "add_index", "syntax error");
        assert_eq!(
            err.to_string(),
            "Migration 2 (add_index) failed on sqlite: syntax error"
        );
        assert_eq!(err.backend(), "sqlite");
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(DataError::not_found("Pet", 42).to_string(), "Pet 42 not found");
    }

    #[test]
    fn test_from_sqlite_error_keeps_backend() {
        let err: DataError = SqliteError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.backend(), "sqlite");
        assert!(err.is_transient());
    }

    #[test]
    fn test_schema_mismatch_becomes_migration_failure() {
        let err: DataError = SqliteError::SchemaMismatch {
            stored: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, DataError::MigrationFailed { version: 1, .. }));
        assert!(err.to_string().contains("incompatible schema"));
    }
}
