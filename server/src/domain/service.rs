//! Per-kind record use cases
//!
//! [`RecordService`] wraps a [`RecordStore`] with the identity rules of the
//! REST surface and owns the service error taxonomy.

use thiserror::Error;

use super::patch::RecordPatch;
use crate::data::filters::Criteria;
use crate::data::types::{Page, PageRequest};
use crate::data::{DataError, Record, RecordStore, TransactionalService};

/// Error raised by record use cases
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Client input was rejected
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    /// The addressed record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// The operation needs an id in the path
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Store failure
    #[error(transparent)]
    Data(DataError),
}

impl ServiceError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::validation("FIELD_REQUIRED", format!("{} is required", field))
    }
}

impl From<DataError> for ServiceError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Data(other),
        }
    }
}

/// Take a required value, rejecting absence
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::required(field))
}

/// Use cases over one record kind
pub struct RecordService<R: Record> {
    store: Box<dyn RecordStore<R> + Send + Sync>,
}

impl<R: Record> RecordService<R> {
    pub fn new(store: Box<dyn RecordStore<R> + Send + Sync>) -> Self {
        Self { store }
    }

    pub fn from_database(database: &TransactionalService) -> Self {
        Self::new(database.repository::<R>())
    }

    /// Persist a new record; it must not carry an id
    pub async fn create(&self, record: R) -> Result<R, ServiceError> {
        if record.id().is_some() {
            return Err(ServiceError::validation(
                "ID_EXISTS",
                format!("A new {} cannot already have an ID", R::KIND),
            ));
        }
        tracing::debug!(kind = R::KIND, "Creating record");
        Ok(self.store.save(record).await?)
    }

    /// Replace every mutable field of record `id`
    pub async fn update(&self, id: i64, record: R) -> Result<R, ServiceError> {
        check_body_id(id, record.id())?;
        if !self.store.exists_by_id(id).await? {
            return Err(ServiceError::NotFound { kind: R::KIND, id });
        }
        tracing::debug!(kind = R::KIND, id, "Updating record");
        Ok(self.store.save(record).await?)
    }

    /// Merge the fields present in `patch` onto record `id`
    pub async fn partial_update<P>(&self, id: i64, patch: P) -> Result<R, ServiceError>
    where
        P: RecordPatch<R>,
    {
        check_body_id(id, patch.id())?;
        let mut record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { kind: R::KIND, id })?;

        patch.apply_to(&mut record)?;
        tracing::debug!(kind = R::KIND, id, "Partially updating record");
        Ok(self.store.save(record).await?)
    }

    pub async fn find_one(&self, id: i64) -> Result<R, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { kind: R::KIND, id })
    }

    pub async fn find_by_criteria<C>(
        &self,
        criteria: &C,
        page: &PageRequest,
    ) -> Result<Page<R>, ServiceError>
    where
        C: Criteria<Record = R>,
    {
        tracing::debug!(kind = R::KIND, %criteria, page = page.page, "Find by criteria");
        Ok(self.store.find_all(&criteria.to_predicate(), page).await?)
    }

    pub async fn count_by_criteria<C>(&self, criteria: &C) -> Result<u64, ServiceError>
    where
        C: Criteria<Record = R>,
    {
        tracing::debug!(kind = R::KIND, %criteria, "Count by criteria");
        Ok(self.store.count(&criteria.to_predicate()).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        tracing::debug!(kind = R::KIND, id, "Deleting record");
        if self.store.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound { kind: R::KIND, id })
        }
    }
}

/// Body id must be present and match the path id
fn check_body_id(path_id: i64, body_id: Option<i64>) -> Result<(), ServiceError> {
    match body_id {
        None => Err(ServiceError::validation("ID_NULL", "Invalid id: id is null")),
        Some(id) if id != path_id => Err(ServiceError::validation(
            "ID_INVALID",
            format!("Invalid id: body id {} does not match path id {}", id, path_id),
        )),
        Some(_) => Ok(()),
    }
}
