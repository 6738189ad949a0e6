//! Health record API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::HealthRecord;
use crate::data::types::value::truncate_micros;
use crate::domain::{Patch, RecordPatch, ServiceError, required};

/// Health record DTO for requests and responses
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordDto {
    pub id: Option<i64>,
    #[validate(required(message = "petId is required"))]
    pub pet_id: Option<i64>,
    #[validate(required(message = "vetId is required"))]
    pub vet_id: Option<i64>,
    #[validate(required(message = "apptId is required"))]
    pub appt_id: Option<i64>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<HealthRecordDto> for HealthRecord {
    type Error = ServiceError;

    fn try_from(dto: HealthRecordDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id,
            pet_id: required(dto.pet_id, "petId")?,
            vet_id: required(dto.vet_id, "vetId")?,
            appt_id: required(dto.appt_id, "apptId")?,
            diagnosis: dto.diagnosis,
            treatment: dto.treatment,
            notes: dto.notes,
            created_at: dto.created_at.map(truncate_micros),
        })
    }
}

impl From<HealthRecord> for HealthRecordDto {
    fn from(record: HealthRecord) -> Self {
        Self {
            id: record.id,
            pet_id: Some(record.pet_id),
            vet_id: Some(record.vet_id),
            appt_id: Some(record.appt_id),
            diagnosis: record.diagnosis,
            treatment: record.treatment,
            notes: record.notes,
            created_at: record.created_at,
        }
    }
}

/// Partial update body: omitted keys are left alone, `null` clears
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthRecordPatch {
    pub id: Option<i64>,
    #[schema(value_type = Option<i64>)]
    pub pet_id: Patch<i64>,
    #[schema(value_type = Option<i64>)]
    pub vet_id: Patch<i64>,
    #[schema(value_type = Option<i64>)]
    pub appt_id: Patch<i64>,
    #[schema(value_type = Option<String>)]
    pub diagnosis: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub treatment: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub notes: Patch<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub created_at: Patch<DateTime<Utc>>,
}

impl RecordPatch<HealthRecord> for HealthRecordPatch {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn apply_to(self, record: &mut HealthRecord) -> Result<(), ServiceError> {
        self.pet_id.apply_required(&mut record.pet_id, "petId")?;
        self.vet_id.apply_required(&mut record.vet_id, "vetId")?;
        self.appt_id.apply_required(&mut record.appt_id, "apptId")?;
        self.diagnosis.apply(&mut record.diagnosis);
        self.treatment.apply(&mut record.treatment);
        self.notes.apply(&mut record.notes);
        self.created_at.map(truncate_micros).apply(&mut record.created_at);
        Ok(())
    }
}
