//! Health record API endpoints

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
use crate::data::types::HealthRecord;
use crate::domain::{HealthRecordCriteria, RecordService};

use types::{HealthRecordDto, HealthRecordPatch};

const BASE_PATH: &str = "/api/v1/health-records";

/// Shared state for Health records API endpoints
#[derive(Clone)]
pub struct HealthRecordsApiState {
    pub service: Arc<RecordService<HealthRecord>>,
}

/// Build Health records API routes
pub fn routes(database: &TransactionalService) -> Router<()> {
    let state = HealthRecordsApiState {
        service: Arc::new(RecordService::from_database(database)),
    };

    Router::new()
        .route(
            "/",
            get(list_health_records)
                .post(create_health_record)
                .put(update_requires_id)
                .patch(update_requires_id),
        )
        .route("/count", get(count_health_records))
        .route(
            "/{id}",
            get(get_health_record)
                .put(update_health_record)
                .patch(partial_update_health_record)
                .delete(delete_health_record),
        )
        .with_state(state)
}

/// List health records matching the filter parameters
#[utoipa::path(
    get,
    path = "/api/v1/health-records",
    tag = "health-records",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-based)"),
        ("limit" = Option<u32>, Query, description = "Items per page (1-500)"),
        ("sort" = Option<String>, Query, description = "Sort field, optionally ',asc' or ',desc'")
    ),
    responses(
        (status = 200, description = "Health records with pagination metadata and X-Total-Count header"),
        (status = 400, description = "Invalid filter, paging or sort parameter")
    )
)]
pub async fn list_health_records(
    State(state): State<HealthRecordsApiState>,
    query: ListQuery<HealthRecordCriteria>,
) -> Result<PaginatedResponse<HealthRecordDto>, ApiError> {
    let page = state
        .service
        .find_by_criteria(&query.criteria, &query.page)
        .await?;
    Ok(PaginatedResponse::from_page(page, &query.page))
}

/// Count health records matching the filter parameters
#[utoipa::path(
    get,
    path = "/api/v1/health-records/count",
    tag = "health-records",
    responses(
        (status = 200, description = "Number of matching health records", body = u64),
        (status = 400, description = "Invalid filter parameter")
    )
)]
pub async fn count_health_records(
    State(state): State<HealthRecordsApiState>,
    CriteriaQuery(criteria): CriteriaQuery<HealthRecordCriteria>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.service.count_by_criteria(&criteria).await?))
}

/// Record the outcome of a visit
#[utoipa::path(
    post,
    path = "/api/v1/health-records",
    tag = "health-records",
    request_body = HealthRecordDto,
    responses(
        (status = 201, description = "Health record created", body = HealthRecordDto),
        (status = 400, description = "Body carries an id or misses a required field")
    )
)]
pub async fn create_health_record(
    State(state): State<HealthRecordsApiState>,
    ValidatedJson(body): ValidatedJson<HealthRecordDto>,
) -> Result<Response, ApiError> {
    let record = state.service.create(HealthRecord::try_from(body)?).await?;
    tracing::debug!(id = ?record.id, "Health record created");
    Ok(created(BASE_PATH, record.id, HealthRecordDto::from(record)))
}

/// Get a single health record by ID
#[utoipa::path(
    get,
    path = "/api/v1/health-records/{id}",
    tag = "health-records",
    params(("id" = i64, Path, description = "Health record ID")),
    responses(
        (status = 200, description = "Health record details", body = HealthRecordDto),
        (status = 404, description = "Health record not found")
    )
)]
pub async fn get_health_record(
    State(state): State<HealthRecordsApiState>,
    IdPath(id): IdPath,
) -> Result<Json<HealthRecordDto>, ApiError> {
    Ok(Json(state.service.find_one(id).await?.into()))
}

/// Replace every field of a health record
#[utoipa::path(
    put,
    path = "/api/v1/health-records/{id}",
    tag = "health-records",
    params(("id" = i64, Path, description = "Health record ID")),
    request_body = HealthRecordDto,
    responses(
        (status = 200, description = "Health record updated", body = HealthRecordDto),
        (status = 400, description = "Missing or mismatched id, or missing required field"),
        (status = 404, description = "Health record not found")
    )
)]
pub async fn update_health_record(
    State(state): State<HealthRecordsApiState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<HealthRecordDto>,
) -> Result<Json<HealthRecordDto>, ApiError> {
    let record = state.service.update(id, HealthRecord::try_from(body)?).await?;
    Ok(Json(record.into()))
}

/// Update the fields present in the body
#[utoipa::path(
    patch,
    path = "/api/v1/health-records/{id}",
    tag = "health-records",
    params(("id" = i64, Path, description = "Health record ID")),
    request_body(content = HealthRecordPatch, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Health record updated", body = HealthRecordDto),
        (status = 400, description = "Missing or mismatched id, or null for a required field"),
        (status = 404, description = "Health record not found")
    )
)]
pub async fn partial_update_health_record(
    State(state): State<HealthRecordsApiState>,
    IdPath(id): IdPath,
    ValidatedJson(patch): ValidatedJson<HealthRecordPatch>,
) -> Result<Json<HealthRecordDto>, ApiError> {
    let record = state.service.partial_update(id, patch).await?;
    Ok(Json(record.into()))
}

/// Delete a health record
#[utoipa::path(
    delete,
    path = "/api/v1/health-records/{id}",
    tag = "health-records",
    params(("id" = i64, Path, description = "Health record ID")),
    responses(
        (status = 204, description = "Health record deleted"),
        (status = 404, description = "Health record not found")
    )
)]
pub async fn delete_health_record(
    State(state): State<HealthRecordsApiState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
