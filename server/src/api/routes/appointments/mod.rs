//! Appointment API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use super::{created, update_requires_id};
use crate::api::extractors::{CriteriaQuery, IdPath, ListQuery, ValidatedJson};
use crate::api::types::{ApiError, PaginatedResponse};
use crate::data::TransactionalService;
use crate::data::types::Appointment;
use crate::domain::{AppointmentCriteria, RecordService};

use types::{AppointmentDto, AppointmentPatch};

const BASE_PATH: &str = "/api/v1/appointments";

/// Shared state for Appointments API endpoints
#[derive(Clone)]
pub struct AppointmentsApiState {
    pub service: Arc<RecordService<Appointment>>,
}

/// Build Appointments API routes
pub fn routes(database: &TransactionalService) -> Router<()> {
    let state = AppointmentsApiState {
        service: Arc::new(RecordService::from_database(database)),
    };

    Router::new()
        .route(
            "/",
            get(list_appointments)
                .post(create_appointment)
                .put(update_requires_id)
                .patch(update_requires_id),
        )
        .route("/count", get(count_appointments))
        .route(
            "/{id}",
            get(get_appointment)
                .put(update_appointment)
                .patch(partial_update_appointment)
                .delete(delete_appointment),
        )
        .with_state(state)
}

/// List appointments matching the filter parameters
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    tag = "appointments",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-based)"),
        ("limit" = Option<u32>, Query, description = "Items per page (1-500)"),
        ("sort" = Option<String>, Query, description = "Sort field, optionally ',asc' or ',desc'")
    ),
    responses(
        (status = 200, description = "Appointments with pagination metadata and X-Total-Count header"),
        (status = 400, description = "Invalid filter, paging or sort parameter")
    )
)]
pub async fn list_appointments(
    State(state): State<AppointmentsApiState>,
    query: ListQuery<AppointmentCriteria>,
) -> Result<PaginatedResponse<AppointmentDto>, ApiError> {
    let page = state
        .service
        .find_by_criteria(&query.criteria, &query.page)
        .await?;
    Ok(PaginatedResponse::from_page(page, &query.page))
}

/// Count appointments matching the filter parameters
#[utoipa::path(
    get,
    path = "/api/v1/appointments/count",
    tag = "appointments",
    responses(
        (status = 200, description = "Number of matching appointments", body = u64),
        (status = 400, description = "Invalid filter parameter")
    )
)]
pub async fn count_appointments(
    State(state): State<AppointmentsApiState>,
    CriteriaQuery(criteria): CriteriaQuery<AppointmentCriteria>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.service.count_by_criteria(&criteria).await?))
}

/// Book an appointment
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    tag = "appointments",
    request_body = AppointmentDto,
    responses(
        (status = 201, description = "Appointment created", body = AppointmentDto),
        (status = 400, description = "Body carries an id or misses a required field")
    )
)]
pub async fn create_appointment(
    State(state): State<AppointmentsApiState>,
    ValidatedJson(body): ValidatedJson<AppointmentDto>,
) -> Result<Response, ApiError> {
    let appt = state.service.create(Appointment::try_from(body)?).await?;
    tracing::debug!(id = ?appt.id, "Appointment created");
    Ok(created(BASE_PATH, appt.id, AppointmentDto::from(appt)))
}

/// Get a single appointment by ID
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment details", body = AppointmentDto),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn get_appointment(
    State(state): State<AppointmentsApiState>,
    IdPath(id): IdPath,
) -> Result<Json<AppointmentDto>, ApiError> {
    Ok(Json(state.service.find_one(id).await?.into()))
}

/// Replace every field of an appointment
#[utoipa::path(
    put,
    path = "/api/v1/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment ID")),
    request_body = AppointmentDto,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentDto),
        (status = 400, description = "Missing or mismatched id, or missing required field"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn update_appointment(
    State(state): State<AppointmentsApiState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<AppointmentDto>,
) -> Result<Json<AppointmentDto>, ApiError> {
    let appt = state.service.update(id, Appointment::try_from(body)?).await?;
    Ok(Json(appt.into()))
}

/// Update the fields present in the body
#[utoipa::path(
    patch,
    path = "/api/v1/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment ID")),
    request_body(content = AppointmentPatch, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentDto),
        (status = 400, description = "Missing or mismatched id, or null for a required field"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn partial_update_appointment(
    State(state): State<AppointmentsApiState>,
    IdPath(id): IdPath,
    ValidatedJson(patch): ValidatedJson<AppointmentPatch>,
) -> Result<Json<AppointmentDto>, ApiError> {
    let appt = state.service.partial_update(id, patch).await?;
    Ok(Json(appt.into()))
}

/// Delete an appointment
#[utoipa::path(
    delete,
    path = "/api/v1/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment ID")),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn delete_appointment(
    State(state): State<AppointmentsApiState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
