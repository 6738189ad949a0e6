use chrono::{DateTime, FixedOffset, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::enums::ApptStatus;
use super::value::zoned_from_micros;
use super::{decode_enum, decode_error, decode_utc, identity_eq};
use crate::data::traits::Record;
use crate::data::types::value::FieldValue;

/// A scheduled vet visit
///
/// `appt_time` keeps the offset it was booked with; the instant is stored in
/// `appt_time` and the offset in `appt_time_offset`.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: Option<i64>,
    pub pet_id: i64,
    pub owner_id: i64,
    pub vet_id: i64,
    pub appt_time: DateTime<FixedOffset>,
    pub status: Option<ApptStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

identity_eq!(Appointment);

impl Record for Appointment {
    const KIND: &'static str = "Appointment";
    const TABLE: &'static str = "appointments";
    const COLUMNS: &'static [&'static str] = &[
        "pet_id",
        "owner_id",
        "vet_id",
        "appt_time",
        "appt_time_offset",
        "status",
        "created_at",
    ];
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("petId", "pet_id"),
        ("ownerId", "owner_id"),
        ("vetId", "vet_id"),
        ("apptTime", "appt_time"),
        ("status", "status"),
        ("createdAt", "created_at"),
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn value(&self, column: &str) -> FieldValue {
        match column {
            "id" => self.id.into(),
            "pet_id" => self.pet_id.into(),
            "owner_id" => self.owner_id.into(),
            "vet_id" => self.vet_id.into(),
            "appt_time" => self.appt_time.into(),
            "appt_time_offset" => self.appt_time.offset().local_minus_utc().into(),
            "status" => self.status.into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let micros: i64 = row.try_get("appt_time")?;
        let offset: i32 = row.try_get("appt_time_offset")?;
        let appt_time = zoned_from_micros(micros, offset)
            .ok_or_else(|| decode_error("appt_time", "timestamp out of range"))?;

        Ok(Self {
            id: Some(row.try_get("id")?),
            pet_id: row.try_get("pet_id")?,
            owner_id: row.try_get("owner_id")?,
            vet_id: row.try_get("vet_id")?,
            appt_time,
            status: decode_enum(row, "status")?,
            created_at: decode_utc(row, "created_at")?,
        })
    }
}
