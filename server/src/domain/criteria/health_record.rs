use crate::data::filters::{InstantFilter, LongFilter, StringFilter, criteria};
use crate::data::types::HealthRecord;

criteria! {
    /// Filters over health records
    pub struct HealthRecordCriteria for HealthRecord {
        id: LongFilter => "id",
        pet_id: LongFilter => "petId",
        vet_id: LongFilter => "vetId",
        appt_id: LongFilter => "apptId",
        diagnosis: StringFilter => "diagnosis",
        treatment: StringFilter => "treatment",
        notes: StringFilter => "notes",
        created_at: InstantFilter => "createdAt",
    }
}
