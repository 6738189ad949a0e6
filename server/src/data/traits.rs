//! Record store traits
//!
//! [`Record`] describes how a record kind is stored; [`RecordStore`] is the
//! backend-neutral persistence contract implemented by the SQLite and
//! in-memory stores.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;

use crate::data::error::DataError;
use crate::data::filters::Predicate;
use crate::data::types::page::{Page, PageRequest};
use crate::data::types::value::FieldValue;

/// A persisted record kind
pub trait Record: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Display name of the kind ("Pet")
    const KIND: &'static str;

    /// Storage table
    const TABLE: &'static str;

    /// Writable storage columns, id excluded, in insert order
    const COLUMNS: &'static [&'static str];

    /// Wire field name to storage column, for every sortable field
    const FIELDS: &'static [(&'static str, &'static str)];

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Stored value of `column` ("id" included); unknown columns read as null
    fn value(&self, column: &str) -> FieldValue;

    /// Decode a full row (`id` plus [`Record::COLUMNS`])
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    /// Storage column for a wire field name
    fn column_for(field: &str) -> Option<&'static str> {
        Self::FIELDS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
    }
}

/// Persistence contract for one record kind
///
/// Every write is a single atomic unit: a failed call leaves no partial state.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Insert when the record has no id, otherwise replace the stored row.
    ///
    /// Replacing an absent id fails with [`DataError::NotFound`].
    async fn save(&self, record: R) -> Result<R, DataError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<R>, DataError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, DataError>;

    /// Page of records matching `predicate` plus the unpaged match count
    async fn find_all(&self, predicate: &Predicate, page: &PageRequest)
    -> Result<Page<R>, DataError>;

    async fn count(&self, predicate: &Predicate) -> Result<u64, DataError>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> Result<bool, DataError>;
}
