use crate::data::filters::{
    EnumFilter, InstantFilter, LongFilter, ZonedDateTimeFilter, criteria,
};
use crate::data::types::{Appointment, ApptStatus};

pub type ApptStatusFilter = EnumFilter<ApptStatus>;

criteria! {
    /// Filters over appointments
    pub struct AppointmentCriteria for Appointment {
        id: LongFilter => "id",
        pet_id: LongFilter => "petId",
        owner_id: LongFilter => "ownerId",
        vet_id: LongFilter => "vetId",
        appt_time: ZonedDateTimeFilter => "apptTime",
        status: ApptStatusFilter => "status",
        created_at: InstantFilter => "createdAt",
    }
}
