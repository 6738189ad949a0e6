//! Pet API endpoints

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
use crate::data::types::Pet;
use crate::domain::{PetCriteria, RecordService};

use types::{PetDto, PetPatch};

const BASE_PATH: &str = "/api/v1/pets";

/// Shared state for Pets API endpoints
#[derive(Clone)]
pub struct PetsApiState {
    pub service: Arc<RecordService<Pet>>,
}

/// Build Pets API routes
pub fn routes(database: &TransactionalService) -> Router<()> {
    let state = PetsApiState {
        service: Arc::new(RecordService::from_database(database)),
    };

    Router::new()
        .route(
            "/",
            get(list_pets)
                .post(create_pet)
                .put(update_requires_id)
                .patch(update_requires_id),
        )
        .route("/count", get(count_pets))
        .route(
            "/{id}",
            get(get_pet)
                .put(update_pet)
                .patch(partial_update_pet)
                .delete(delete_pet),
        )
        .with_state(state)
}

/// List pets matching the filter parameters
#[utoipa::path(
    get,
    path = "/api/v1/pets",
    tag = "pets",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-based)"),
        ("limit" = Option<u32>, Query, description = "Items per page (1-500)"),
        ("sort" = Option<String>, Query, description = "Sort field, optionally ',asc' or ',desc'")
    ),
    responses(
        (status = 200, description = "Pets with pagination metadata and X-Total-Count header"),
        (status = 400, description = "Invalid filter, paging or sort parameter")
    )
)]
pub async fn list_pets(
    State(state): State<PetsApiState>,
    query: ListQuery<PetCriteria>,
) -> Result<PaginatedResponse<PetDto>, ApiError> {
    let page = state
        .service
        .find_by_criteria(&query.criteria, &query.page)
        .await?;
    Ok(PaginatedResponse::from_page(page, &query.page))
}

/// Count pets matching the filter parameters
#[utoipa::path(
    get,
    path = "/api/v1/pets/count",
    tag = "pets",
    responses(
        (status = 200, description = "Number of matching pets", body = u64),
        (status = 400, description = "Invalid filter parameter")
    )
)]
pub async fn count_pets(
    State(state): State<PetsApiState>,
    CriteriaQuery(criteria): CriteriaQuery<PetCriteria>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.service.count_by_criteria(&criteria).await?))
}

/// Register a pet
#[utoipa::path(
    post,
    path = "/api/v1/pets",
    tag = "pets",
    request_body = PetDto,
    responses(
        (status = 201, description = "Pet created", body = PetDto),
        (status = 400, description = "Body carries an id or misses a required field")
    )
)]
pub async fn create_pet(
    State(state): State<PetsApiState>,
    ValidatedJson(body): ValidatedJson<PetDto>,
) -> Result<Response, ApiError> {
    let pet = state.service.create(Pet::try_from(body)?).await?;
    tracing::debug!(id = ?pet.id, "Pet created");
    Ok(created(BASE_PATH, pet.id, PetDto::from(pet)))
}

/// Get a single pet by ID
#[utoipa::path(
    get,
    path = "/api/v1/pets/{id}",
    tag = "pets",
    params(("id" = i64, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet details", body = PetDto),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn get_pet(
    State(state): State<PetsApiState>,
    IdPath(id): IdPath,
) -> Result<Json<PetDto>, ApiError> {
    Ok(Json(state.service.find_one(id).await?.into()))
}

/// Replace every field of a pet
#[utoipa::path(
    put,
    path = "/api/v1/pets/{id}",
    tag = "pets",
    params(("id" = i64, Path, description = "Pet ID")),
    request_body = PetDto,
    responses(
        (status = 200, description = "Pet updated", body = PetDto),
        (status = 400, description = "Missing or mismatched id, or missing required field"),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn update_pet(
    State(state): State<PetsApiState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<PetDto>,
) -> Result<Json<PetDto>, ApiError> {
    let pet = state.service.update(id, Pet::try_from(body)?).await?;
    Ok(Json(pet.into()))
}

/// Update the fields present in the body
#[utoipa::path(
    patch,
    path = "/api/v1/pets/{id}",
    tag = "pets",
    params(("id" = i64, Path, description = "Pet ID")),
    request_body(content = PetPatch, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Pet updated", body = PetDto),
        (status = 400, description = "Missing or mismatched id, or null for a required field"),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn partial_update_pet(
    State(state): State<PetsApiState>,
    IdPath(id): IdPath,
    ValidatedJson(patch): ValidatedJson<PetPatch>,
) -> Result<Json<PetDto>, ApiError> {
    let pet = state.service.partial_update(id, patch).await?;
    Ok(Json(pet.into()))
}

/// Delete a pet
#[utoipa::path(
    delete,
    path = "/api/v1/pets/{id}",
    tag = "pets",
    params(("id" = i64, Path, description = "Pet ID")),
    responses(
        (status = 204, description = "Pet deleted"),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn delete_pet(
    State(state): State<PetsApiState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
