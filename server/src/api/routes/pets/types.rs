//! Pet API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::value::truncate_micros;
use crate::data::types::{Gender, Pet};
use crate::domain::{Patch, RecordPatch, ServiceError, required};

/// Pet DTO for requests and responses
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetDto {
    pub id: Option<i64>,
    #[validate(required(message = "ownerId is required"))]
    pub owner_id: Option<i64>,
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub photo_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<PetDto> for Pet {
    type Error = ServiceError;

    fn try_from(dto: PetDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id,
            owner_id: required(dto.owner_id, "ownerId")?,
            name: required(dto.name, "name")?,
            species: dto.species,
            breed: dto.breed,
            age: dto.age,
            gender: dto.gender,
            photo_url: dto.photo_url,
            created_at: dto.created_at.map(truncate_micros),
        })
    }
}

impl From<Pet> for PetDto {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            owner_id: Some(pet.owner_id),
            name: Some(pet.name),
            species: pet.species,
            breed: pet.breed,
            age: pet.age,
            gender: pet.gender,
            photo_url: pet.photo_url,
            created_at: pet.created_at,
        }
    }
}

/// Partial update body: omitted keys are left alone, `null` clears
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PetPatch {
    pub id: Option<i64>,
    #[schema(value_type = Option<i64>)]
    pub owner_id: Patch<i64>,
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub species: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub breed: Patch<String>,
    #[schema(value_type = Option<i32>)]
    pub age: Patch<i32>,
    #[schema(value_type = Option<Gender>)]
    pub gender: Patch<Gender>,
    #[schema(value_type = Option<String>)]
    pub photo_url: Patch<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub created_at: Patch<DateTime<Utc>>,
}

impl RecordPatch<Pet> for PetPatch {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn apply_to(self, pet: &mut Pet) -> Result<(), ServiceError> {
        self.owner_id.apply_required(&mut pet.owner_id, "ownerId")?;
        self.name.apply_required(&mut pet.name, "name")?;
        self.species.apply(&mut pet.species);
        self.breed.apply(&mut pet.breed);
        self.age.apply(&mut pet.age);
        self.gender.apply(&mut pet.gender);
        self.photo_url.apply(&mut pet.photo_url);
        self.created_at.map(truncate_micros).apply(&mut pet.created_at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Pet {
        Pet {
            id: Some(1),
            owner_id: 7,
            name: "Rex".to_string(),
            species: Some("dog".to_string()),
            breed: Some("Beagle".to_string()),
            age: Some(3),
            gender: Some(Gender::Male),
            photo_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_dto_requires_owner_and_name() {
        let dto = PetDto {
            name: Some("Rex".to_string()),
            ..Default::default()
        };
        let err = Pet::try_from(dto).unwrap_err();
        assert!(matches!(err, ServiceError::Validation { code: "FIELD_REQUIRED", .. }));
        assert!(PetDto::default().validate().is_err());
    }

    #[test]
    fn test_dto_wire_names() {
        let json = serde_json::to_value(PetDto::from(stored())).unwrap();
        assert_eq!(json["ownerId"], 7);
        assert_eq!(json["gender"], "MALE");
        assert!(json["photoUrl"].is_null());
    }

    #[test]
    fn test_patch_merges_present_fields_only() {
        let patch: PetPatch =
            serde_json::from_str(r#"{"id": 1, "age": 4, "breed": null}"#).unwrap();
        let mut pet = stored();
        patch.apply_to(&mut pet).unwrap();

        assert_eq!(pet.age, Some(4));
        assert_eq!(pet.breed, None);
        assert_eq!(pet.species.as_deref(), Some("dog"));
        assert_eq!(pet.name, "Rex");
    }

    #[test]
    fn test_patch_rejects_null_required_field() {
        let patch: PetPatch = serde_json::from_str(r#"{"id": 1, "name": null}"#).unwrap();
        let err = patch.apply_to(&mut stored()).unwrap_err();
        assert!(matches!(err, ServiceError::Validation { code: "FIELD_REQUIRED", .. }));
    }
}
