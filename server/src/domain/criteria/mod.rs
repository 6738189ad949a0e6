//! Criteria types for every record kind

mod appointment;
mod health_record;
mod pet;

pub use appointment::{AppointmentCriteria, ApptStatusFilter};
pub use health_record::HealthRecordCriteria;
pub use pet::{GenderFilter, PetCriteria};
