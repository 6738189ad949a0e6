//! Data storage layer
//!
//! - `sqlite` - Persistent record store (default)
//! - `memory` - Volatile record store with the same semantics
//! - `filters` - Typed filters, criteria and the predicates they build
//! - `types` - Records, column values and paging types
//! - `traits` - The record store contract
//! - `error` - Unified error type for all backends

pub mod error;
pub mod filters;
pub mod memory;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use memory::MemoryService;
pub use sqlite::SqliteService;
pub use traits::{Record, RecordStore};

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::DatabaseBackend;
use crate::core::storage::AppStorage;

/// Record store service
///
/// Wraps the configured backend and hands out per-kind [`RecordStore`]s.
pub enum TransactionalService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// In-memory backend (nothing survives a restart)
    Memory(Arc<MemoryService>),
}

impl TransactionalService {
    /// Initialize the configured backend
    pub async fn init(backend: DatabaseBackend, storage: &AppStorage) -> Result<Self, DataError> {
        match backend {
            DatabaseBackend::Sqlite => {
                let service = SqliteService::init(storage).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Memory => Ok(Self::memory()),
        }
    }

    /// Empty in-memory backend
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryService::new()))
    }

    /// SQLite backend on a private in-memory database
    #[cfg(test)]
    pub async fn sqlite_in_memory() -> Self {
        match SqliteService::in_memory().await {
            Ok(service) => Self::Sqlite(Arc::new(service)),
            Err(e) => panic!("in-memory SQLite failed to open: {}", e),
        }
    }

    /// Check that the backend answers
    pub async fn ping(&self) -> Result<(), DataError> {
        match self {
            Self::Sqlite(s) => s.ping().await.map_err(Into::into),
            Self::Memory(_) => Ok(()),
        }
    }

    /// Run a WAL checkpoint (SQLite only)
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        match self {
            Self::Sqlite(s) => s.checkpoint().await.map_err(Into::into),
            Self::Memory(_) => Ok(()),
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Memory(m) => {
                m.clear();
                tracing::debug!("Memory store cleared");
            }
        }
    }

    /// Start the background checkpoint task (SQLite only)
    pub fn start_checkpoint_task(
        &self,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Option<JoinHandle<()>> {
        match self {
            Self::Sqlite(s) => Some(s.start_checkpoint_task(shutdown_rx)),
            Self::Memory(_) => None,
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Memory(_) => DatabaseBackend::Memory,
        }
    }

    /// Record store for one record kind
    pub fn repository<R: Record>(&self) -> Box<dyn RecordStore<R> + Send + Sync> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
            Self::Memory(m) => Box::new(Arc::clone(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{Op, Predicate};
    use crate::data::types::value::FieldValue;
    use crate::data::types::{HealthRecord, PageRequest, Sort, SortDirection};

    fn record(pet_id: i64, diagnosis: Option<&str>) -> HealthRecord {
        HealthRecord {
            id: None,
            pet_id,
            vet_id: 10,
            appt_id: 100,
            diagnosis: diagnosis.map(str::to_string),
            treatment: Some("rest".to_string()),
            notes: None,
            created_at: None,
        }
    }

    async fn backends() -> Vec<TransactionalService> {
        vec![
            TransactionalService::memory(),
            TransactionalService::sqlite_in_memory().await,
        ]
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_replaces() {
        for service in backends().await {
            let repo = service.repository::<HealthRecord>();

            let saved = repo.save(record(1, Some("otitis"))).await.unwrap();
            let id = saved.id.unwrap();
            assert!(repo.exists_by_id(id).await.unwrap());

            let mut changed = saved.clone();
            changed.diagnosis = None;
            repo.save(changed).await.unwrap();

            let found = repo.find_by_id(id).await.unwrap().unwrap();
            assert_eq!(found.diagnosis, None);
            assert_eq!(found.treatment.as_deref(), Some("rest"));
        }
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_is_not_found() {
        for service in backends().await {
            let repo = service.repository::<HealthRecord>();
            let mut ghost = record(1, None);
            ghost.id = Some(999);

            let err = repo.save(ghost).await.unwrap_err();
            assert!(matches!(err, DataError::NotFound { id: 999, .. }));
            assert_eq!(repo.count(&Predicate::all()).await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        for service in backends().await {
            let repo = service.repository::<HealthRecord>();
            let id = repo.save(record(1, None)).await.unwrap().id.unwrap();

            assert!(repo.delete_by_id(id).await.unwrap());
            assert!(!repo.delete_by_id(id).await.unwrap());
            assert!(repo.find_by_id(id).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_find_all_pages_and_counts() {
        for service in backends().await {
            let repo = service.repository::<HealthRecord>();
            for pet_id in 1..=5 {
                repo.save(record(pet_id, Some("ok"))).await.unwrap();
            }

            let mut predicate = Predicate::all();
            predicate.push("pet_id", Op::Gte(FieldValue::Integer(2)));
            let sort = Sort {
                column: "pet_id",
                direction: SortDirection::Desc,
            };
            let page = repo
                .find_all(&predicate, &PageRequest::new(1, 3, sort))
                .await
                .unwrap();

            assert_eq!(page.total, 4);
            let pets: Vec<i64> = page.items.iter().map(|r| r.pet_id).collect();
            assert_eq!(pets, vec![5, 4, 3]);
            assert_eq!(repo.count(&predicate).await.unwrap(), 4);
        }
    }

    #[tokio::test]
    async fn test_backend_reports_kind() {
        assert_eq!(TransactionalService::memory().backend(), DatabaseBackend::Memory);
        let sqlite = TransactionalService::sqlite_in_memory().await;
        assert_eq!(sqlite.backend(), DatabaseBackend::Sqlite);
        sqlite.ping().await.unwrap();
    }
}
