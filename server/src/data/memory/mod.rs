//! In-memory record store
//!
//! Keeps one table per record kind behind a read/write lock. Writes take the
//! exclusive lock once, so each one is atomic; results match the SQLite store
//! for the same predicate and page request.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::data::error::DataError;
use crate::data::filters::Predicate;
use crate::data::traits::{Record, RecordStore};
use crate::data::types::page::{Page, PageRequest, SortDirection};

struct MemoryTable<R> {
    rows: BTreeMap<i64, R>,
    next_id: i64,
}

impl<R> Default for MemoryTable<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Volatile store for every record kind
#[derive(Default)]
pub struct MemoryService {
    tables: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R: Record, T>(&self, f: impl FnOnce(&MemoryTable<R>) -> T) -> T {
        let tables = self.tables.read();
        match tables
            .get(&TypeId::of::<R>())
            .and_then(|t| t.downcast_ref::<MemoryTable<R>>())
        {
            Some(table) => f(table),
            None => f(&MemoryTable::default()),
        }
    }

    fn write<R: Record, T>(&self, f: impl FnOnce(&mut MemoryTable<R>) -> T) -> T {
        let mut tables = self.tables.write();
        let entry = tables
            .entry(TypeId::of::<R>())
            .or_insert_with(|| Box::new(MemoryTable::<R>::default()));
        match entry.downcast_mut::<MemoryTable<R>>() {
            Some(table) => f(table),
            // Unreachable: tables are keyed by the TypeId of their record type
            None => f(&mut MemoryTable::default()),
        }
    }

    /// Drop every table
    pub fn clear(&self) {
        self.tables.write().clear();
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for Arc<MemoryService> {
    async fn save(&self, record: R) -> Result<R, DataError> {
        self.write::<R, _>(|table| match record.id() {
            None => {
                let mut saved = record;
                let id = table.next_id;
                table.next_id += 1;
                saved.set_id(id);
                table.rows.insert(id, saved.clone());
                Ok(saved)
            }
            Some(id) => match table.rows.get_mut(&id) {
                Some(existing) => {
                    *existing = record.clone();
                    Ok(record)
                }
                None => Err(DataError::not_found(R::KIND, id)),
            },
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<R>, DataError> {
        Ok(self.read::<R, _>(|table| table.rows.get(&id).cloned()))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DataError> {
        Ok(self.read::<R, _>(|table| table.rows.contains_key(&id)))
    }

    async fn find_all(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> Result<Page<R>, DataError> {
        // Rows are keyed by id, so they are already distinct
        let mut rows: Vec<R> = self.read::<R, _>(|table| {
            table
                .rows
                .values()
                .filter(|record| predicate.matches(*record))
                .cloned()
                .collect()
        });
        let total = rows.len() as u64;

        let column = page.sort.column;
        rows.sort_by(|a, b| {
            let ord = a.value(column).sort_cmp(&b.value(column));
            let ord = match page.sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            ord.then_with(|| a.id().cmp(&b.id()))
        });

        let items = rows
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit as usize)
            .collect();

        Ok(Page { items, total })
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, DataError> {
        Ok(self.read::<R, _>(|table| {
            table.rows.values().filter(|r| predicate.matches(*r)).count() as u64
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DataError> {
        Ok(self.write::<R, _>(|table| table.rows.remove(&id).is_some()))
    }
}
