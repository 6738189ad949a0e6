//! Appointment API types

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::value::truncate_micros;
use crate::data::types::{Appointment, ApptStatus};
use crate::domain::{Patch, RecordPatch, ServiceError, required};

/// Appointment DTO for requests and responses
///
/// `apptTime` is rendered in the offset it was booked with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: Option<i64>,
    #[validate(required(message = "petId is required"))]
    pub pet_id: Option<i64>,
    #[validate(required(message = "ownerId is required"))]
    pub owner_id: Option<i64>,
    #[validate(required(message = "vetId is required"))]
    pub vet_id: Option<i64>,
    #[validate(required(message = "apptTime is required"))]
    pub appt_time: Option<DateTime<FixedOffset>>,
    pub status: Option<ApptStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<AppointmentDto> for Appointment {
    type Error = ServiceError;

    fn try_from(dto: AppointmentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id,
            pet_id: required(dto.pet_id, "petId")?,
            owner_id: required(dto.owner_id, "ownerId")?,
            vet_id: required(dto.vet_id, "vetId")?,
            appt_time: truncate_micros(required(dto.appt_time, "apptTime")?),
            status: dto.status,
            created_at: dto.created_at.map(truncate_micros),
        })
    }
}

impl From<Appointment> for AppointmentDto {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id,
            pet_id: Some(appt.pet_id),
            owner_id: Some(appt.owner_id),
            vet_id: Some(appt.vet_id),
            appt_time: Some(appt.appt_time),
            status: appt.status,
            created_at: appt.created_at,
        }
    }
}

/// Partial update body: omitted keys are left alone, `null` clears
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentPatch {
    pub id: Option<i64>,
    #[schema(value_type = Option<i64>)]
    pub pet_id: Patch<i64>,
    #[schema(value_type = Option<i64>)]
    pub owner_id: Patch<i64>,
    #[schema(value_type = Option<i64>)]
    pub vet_id: Patch<i64>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub appt_time: Patch<DateTime<FixedOffset>>,
    #[schema(value_type = Option<ApptStatus>)]
    pub status: Patch<ApptStatus>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub created_at: Patch<DateTime<Utc>>,
}

impl RecordPatch<Appointment> for AppointmentPatch {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn apply_to(self, appt: &mut Appointment) -> Result<(), ServiceError> {
        self.pet_id.apply_required(&mut appt.pet_id, "petId")?;
        self.owner_id.apply_required(&mut appt.owner_id, "ownerId")?;
        self.vet_id.apply_required(&mut appt.vet_id, "vetId")?;
        self.appt_time
            .map(truncate_micros)
            .apply_required(&mut appt.appt_time, "apptTime")?;
        self.status.apply(&mut appt.status);
        self.created_at.map(truncate_micros).apply(&mut appt.created_at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_pet_id_is_rejected() {
        let dto: AppointmentDto = serde_json::from_str(
            r#"{"ownerId": 1, "vetId": 2, "apptTime": "2024-05-01T09:30:00+02:00"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
        let err = Appointment::try_from(dto).unwrap_err();
        assert_eq!(err.to_string(), "petId is required");
    }

    #[test]
    fn test_appt_time_keeps_offset() {
        let dto: AppointmentDto = serde_json::from_str(
            r#"{"petId": 1, "ownerId": 1, "vetId": 2, "apptTime": "2024-05-01T09:30:00.123456789+02:00", "status": "PENDING"}"#,
        )
        .unwrap();
        let appt = Appointment::try_from(dto).unwrap();
        assert_eq!(appt.appt_time.offset().local_minus_utc(), 7200);
        assert_eq!(appt.appt_time.timestamp_subsec_nanos(), 123_456_000);

        let json = serde_json::to_value(AppointmentDto::from(appt)).unwrap();
        assert_eq!(json["apptTime"], "2024-05-01T09:30:00.123456+02:00");
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn test_patch_clears_status_but_not_appt_time() {
        let mut appt = Appointment {
            id: Some(1),
            pet_id: 1,
            owner_id: 1,
            vet_id: 2,
            appt_time: "2024-05-01T09:30:00+02:00".parse().unwrap(),
            status: Some(ApptStatus::Confirmed),
            created_at: None,
        };

        let patch: AppointmentPatch =
            serde_json::from_str(r#"{"id": 1, "status": null, "vetId": 5}"#).unwrap();
        patch.apply_to(&mut appt).unwrap();
        assert_eq!(appt.status, None);
        assert_eq!(appt.vet_id, 5);

        let patch: AppointmentPatch =
            serde_json::from_str(r#"{"id": 1, "apptTime": null}"#).unwrap();
        assert!(patch.apply_to(&mut appt).is_err());
    }
}
