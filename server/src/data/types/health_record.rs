use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::{decode_utc, identity_eq};
use crate::data::traits::Record;
use crate::data::types::value::FieldValue;

/// Outcome of an appointment for one pet
#[derive(Debug, Clone)]
pub struct HealthRecord {
    pub id: Option<i64>,
    pub pet_id: i64,
    pub vet_id: i64,
    pub appt_id: i64,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

identity_eq!(HealthRecord);

impl Record for HealthRecord {
    const KIND: &'static str = "HealthRecord";
    const TABLE: &'static str = "health_records";
    const COLUMNS: &'static [&'static str] = &[
        "pet_id",
        "vet_id",
        "appt_id",
        "diagnosis",
        "treatment",
        "notes",
        "created_at",
    ];
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("petId", "pet_id"),
        ("vetId", "vet_id"),
        ("apptId", "appt_id"),
        ("diagnosis", "diagnosis"),
        ("treatment", "treatment"),
        ("notes", "notes"),
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
            "vet_id" => self.vet_id.into(),
            "appt_id" => self.appt_id.into(),
            "diagnosis" => self.diagnosis.clone().into(),
            "treatment" => self.treatment.clone().into(),
            "notes" => self.notes.clone().into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: Some(row.try_get("id")?),
            pet_id: row.try_get("pet_id")?,
            vet_id: row.try_get("vet_id")?,
            appt_id: row.try_get("appt_id")?,
            diagnosis: row.try_get("diagnosis")?,
            treatment: row.try_get("treatment")?,
            notes: row.try_get("notes")?,
            created_at: decode_utc(row, "created_at")?,
        })
    }
}
