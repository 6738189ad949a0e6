//! Record types shared by every store backend

mod appointment;
mod enums;
mod health_record;
pub mod page;
mod pet;
pub mod value;

pub use appointment::Appointment;
pub use enums::{ApptStatus, Gender, UnknownVariant};
pub use health_record::HealthRecord;
pub use page::{Page, PageRequest, Sort, SortDirection};
pub use pet::Pet;
pub use value::FieldValue;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Equality by identity: two records are equal only when both carry the same id
macro_rules! identity_eq {
    ($record:ty) => {
        impl PartialEq for $record {
            fn eq(&self, other: &Self) -> bool {
                matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
            }
        }
    };
}

pub(crate) use identity_eq;

fn decode_error(column: &str, reason: impl std::fmt::Display) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: reason.to_string().into(),
    }
}

fn decode_enum<E>(row: &SqliteRow, column: &str) -> Result<Option<E>, sqlx::Error>
where
    E: FromStr,
    E::Err: std::fmt::Display,
{
    row.try_get::<Option<String>, _>(column)?
        .map(|text| text.parse::<E>().map_err(|e| decode_error(column, e)))
        .transpose()
}

fn decode_utc(row: &SqliteRow, column: &str) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(column)?
        .map(|micros| {
            value::utc_from_micros(micros)
                .ok_or_else(|| decode_error(column, "timestamp out of range"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(id: Option<i64>, name: &str) -> Pet {
        Pet {
            id,
            owner_id: 1,
            name: name.to_string(),
            species: None,
            breed: None,
            age: None,
            gender: None,
            photo_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_equality_is_by_identity() {
        assert_eq!(pet(Some(1), "Rex"), pet(Some(1), "Fido"));
        assert_ne!(pet(Some(1), "Rex"), pet(Some(2), "Rex"));
        assert_ne!(pet(None, "Rex"), pet(Some(1), "Rex"));
        assert_ne!(pet(None, "Rex"), pet(None, "Rex"));
    }

    #[test]
    fn test_value_reads_columns() {
        use crate::data::traits::Record;

        let mut p = pet(None, "Rex");
        p.gender = Some(Gender::Male);
        assert_eq!(p.value("id"), FieldValue::Null);
        assert_eq!(p.value("name"), FieldValue::Text("Rex".to_string()));
        assert_eq!(p.value("gender"), FieldValue::Text("MALE".to_string()));
        assert_eq!(p.value("age"), FieldValue::Null);
        assert_eq!(p.value("no_such_column"), FieldValue::Null);

        p.set_id(7);
        assert_eq!(p.value("id"), FieldValue::Integer(7));
        assert_eq!(Pet::column_for("photoUrl"), Some("photo_url"));
        assert_eq!(Pet::column_for("photo_url"), None);
    }

    #[test]
    fn test_zoned_appointment_exposes_offset() {
        use crate::data::traits::Record;

        let appt_time = DateTime::parse_from_rfc3339("2024-05-01T09:30:00-04:00").unwrap();
        let appt = Appointment {
            id: Some(1),
            pet_id: 1,
            owner_id: 2,
            vet_id: 3,
            appt_time,
            status: Some(ApptStatus::Pending),
            created_at: None,
        };
        assert_eq!(appt.value("appt_time_offset"), FieldValue::Integer(-4 * 3600));
        assert_eq!(
            appt.value("appt_time"),
            FieldValue::Timestamp(appt_time.timestamp_micros())
        );
    }
}
