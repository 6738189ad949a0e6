//! RecordStore trait implementation for SQLite
//!
//! One generic implementation serves every record kind: statements are built
//! from the kind's table and column list, and predicates render into a
//! parameterised `WHERE` clause.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{Sqlite, SqliteArguments};

use crate::data::error::DataError;
use crate::data::filters::{Predicate, SqlParams};
use crate::data::traits::{Record, RecordStore};
use crate::data::types::page::{Page, PageRequest};
use crate::data::types::value::FieldValue;

use super::{SqliteError, SqliteService};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

fn bind_value(query: SqliteQuery<'_>, value: FieldValue) -> SqliteQuery<'_> {
    match value {
        FieldValue::Null => query.bind(None::<i64>),
        FieldValue::Integer(v) | FieldValue::Timestamp(v) => query.bind(v),
        FieldValue::Text(v) => query.bind(v),
    }
}

fn bind_all(sql: &str, values: Vec<FieldValue>) -> SqliteQuery<'_> {
    values.into_iter().fold(sqlx::query(sql), bind_value)
}

fn select_columns<R: Record>() -> String {
    std::iter::once("id")
        .chain(R::COLUMNS.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

fn db_err(e: sqlx::Error) -> DataError {
    SqliteError::from(e).into()
}

#[async_trait]
impl<R: Record> RecordStore<R> for Arc<SqliteService> {
    async fn save(&self, record: R) -> Result<R, DataError> {
        let values: Vec<FieldValue> = R::COLUMNS.iter().map(|c| record.value(c)).collect();

        match record.id() {
            None => {
                let placeholders = vec!["?"; R::COLUMNS.len()].join(", ");
                let sql = format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    R::TABLE,
                    R::COLUMNS.join(", "),
                    placeholders
                );
                let result = bind_all(&sql, values)
                    .execute(self.pool())
                    .await
                    .map_err(db_err)?;

                let mut saved = record;
                saved.set_id(result.last_insert_rowid());
                tracing::debug!(kind = R::KIND, id = result.last_insert_rowid(), "Record inserted");
                Ok(saved)
            }
            Some(id) => {
                let assignments = R::COLUMNS
                    .iter()
                    .map(|c| format!("{} = ?", c))
                    .collect::<Vec<_>>()
                    .join(", ");
                let sql = format!("UPDATE {} SET {} WHERE id = ?", R::TABLE, assignments);
                let result = bind_all(&sql, values)
                    .bind(id)
                    .execute(self.pool())
                    .await
                    .map_err(db_err)?;

                if result.rows_affected() == 0 {
                    return Err(DataError::not_found(R::KIND, id));
                }
                tracing::debug!(kind = R::KIND, id, "Record updated");
                Ok(record)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<R>, DataError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            select_columns::<R>(),
            R::TABLE
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(db_err)?;

        row.as_ref().map(R::from_row).transpose().map_err(db_err)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DataError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", R::TABLE);
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(db_err)
    }

    async fn find_all(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> Result<Page<R>, DataError> {
        let total = RecordStore::<R>::count(self, predicate).await?;

        let mut params = SqlParams::default();
        let where_clause = predicate.to_sql(&mut params);
        let sql = format!(
            "SELECT {}{} FROM {} WHERE {} ORDER BY {} LIMIT ? OFFSET ?",
            if predicate.is_distinct() { "DISTINCT " } else { "" },
            select_columns::<R>(),
            R::TABLE,
            where_clause,
            page.sort.to_sql()
        );

        let rows = bind_all(&sql, params.values)
            .bind(i64::from(page.limit))
            .bind(page.offset() as i64)
            .fetch_all(self.pool())
            .await
            .map_err(db_err)?;

        let items = rows
            .iter()
            .map(R::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;

        Ok(Page { items, total })
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, DataError> {
        let mut params = SqlParams::default();
        let where_clause = predicate.to_sql(&mut params);
        let sql = format!(
            "SELECT COUNT({}) FROM {} WHERE {}",
            if predicate.is_distinct() { "DISTINCT id" } else { "*" },
            R::TABLE,
            where_clause
        );

        let row = bind_all(&sql, params.values)
            .fetch_one(self.pool())
            .await
            .map_err(db_err)?;
        let total: i64 = row.try_get(0).map_err(db_err)?;
        Ok(total as u64)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DataError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }
}
