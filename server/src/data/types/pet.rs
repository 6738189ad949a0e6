use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::enums::Gender;
use super::{decode_enum, decode_utc, identity_eq};
use crate::data::traits::Record;
use crate::data::types::value::FieldValue;

/// A pet registered to an owner
#[derive(Debug, Clone)]
pub struct Pet {
    pub id: Option<i64>,
    pub owner_id: i64,
    pub name: String,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub photo_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

identity_eq!(Pet);

impl Record for Pet {
    const KIND: &'static str = "Pet";
    const TABLE: &'static str = "pets";
    const COLUMNS: &'static [&'static str] = &[
        "owner_id",
        "name",
        "species",
        "breed",
        "age",
        "gender",
        "photo_url",
        "created_at",
    ];
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("ownerId", "owner_id"),
        ("name", "name"),
        ("species", "species"),
        ("breed", "breed"),
        ("age", "age"),
        ("gender", "gender"),
        ("photoUrl", "photo_url"),
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
            "owner_id" => self.owner_id.into(),
            "name" => self.name.as_str().into(),
            "species" => self.species.clone().into(),
            "breed" => self.breed.clone().into(),
            "age" => self.age.into(),
            "gender" => self.gender.into(),
            "photo_url" => self.photo_url.clone().into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: Some(row.try_get("id")?),
            owner_id: row.try_get("owner_id")?,
            name: row.try_get("name")?,
            species: row.try_get("species")?,
            breed: row.try_get("breed")?,
            age: row.try_get("age")?,
            gender: decode_enum(row, "gender")?,
            photo_url: row.try_get("photo_url")?,
            created_at: decode_utc(row, "created_at")?,
        })
    }
}
