//! Domain logic for pet-care records
//!
//! - `criteria` - Per-kind criteria types
//! - `patch` - Field-presence-aware partial updates
//! - `service` - Record use cases and their error taxonomy

pub mod criteria;
pub mod patch;
pub mod service;

#[cfg(test)]
pub(crate) mod samples;

pub use criteria::{
    AppointmentCriteria, ApptStatusFilter, GenderFilter, HealthRecordCriteria, PetCriteria,
};
pub use patch::{Patch, RecordPatch};
pub use service::{RecordService, ServiceError, required};
