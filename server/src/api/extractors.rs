//! Query and body extractors for API routes

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::types::{ApiError, PagingQuery};
use crate::data::filters::{Criteria, parse_criteria};
use crate::data::types::PageRequest;

/// Record id from the `{id}` path segment.
///
/// Returns a 400 Bad Request if the segment is not an integer.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;
        Ok(Self(id))
    }
}

/// Validation rejection with structured error response
pub enum ValidationRejection {
    /// Failed to parse path parameters
    Path(PathRejection),
    /// Failed to parse query string
    Query(QueryRejection),
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Path(rejection) => (
                StatusCode::BAD_REQUEST,
                "PATH_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Query(rejection) => (
                StatusCode::BAD_REQUEST,
                "QUERY_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                "JSON_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                validation_code(&errors),
                format_validation_errors(&errors),
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// `FIELD_REQUIRED` when every failure is a missing required field
fn validation_code(errors: &validator::ValidationErrors) -> &'static str {
    let all_required = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .all(|e| e.code == "required");
    if all_required {
        "FIELD_REQUIRED"
    } else {
        "VALIDATION_ERROR"
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect::<Vec<_>>();
    // field_errors() is a HashMap; keep messages stable for clients
    messages.sort();
    messages.join("; ")
}

/// Query extractor with automatic validation.
///
/// Deserializes query parameters and validates them using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// JSON body extractor with automatic validation.
///
/// Deserializes JSON body and validates it using the `validator` crate.
/// Accepts any `+json` content type, so `application/merge-patch+json`
/// bodies work for PATCH.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// Criteria plus page request from a list query string.
///
/// `page`, `limit` and `sort` go to paging; every other key must be a
/// `<field>.<operation>` filter or `distinct`.
#[derive(Debug)]
pub struct ListQuery<C> {
    pub criteria: C,
    pub page: PageRequest,
}

impl<S, C> FromRequestParts<S> for ListQuery<C>
where
    S: Send + Sync,
    C: Criteria,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ValidatedQuery(paging) = ValidatedQuery::<PagingQuery>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let page = paging
            .to_page_request::<C::Record>()
            .map_err(IntoResponse::into_response)?;

        let criteria = criteria_from_parts::<S, C>(parts, state).await?;
        Ok(Self { criteria, page })
    }
}

/// Criteria from a count query string; paging keys are ignored
#[derive(Debug)]
pub struct CriteriaQuery<C>(pub C);

impl<S, C> FromRequestParts<S> for CriteriaQuery<C>
where
    S: Send + Sync,
    C: Criteria,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        criteria_from_parts::<S, C>(parts, state).await.map(Self)
    }
}

async fn criteria_from_parts<S, C>(parts: &mut Parts, state: &S) -> Result<C, Response>
where
    S: Send + Sync,
    C: Criteria,
{
    let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
        .await
        .map_err(|e| ValidationRejection::Query(e).into_response())?;

    let filters = pairs
        .into_iter()
        .filter(|(key, _)| !PagingQuery::KEYS.contains(&key.as_str()));

    parse_criteria::<C, _, _>(filters).map_err(|e| ApiError::from(e).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use validator::ValidationErrors;

    use crate::data::types::SortDirection;
    use crate::domain::PetCriteria;

    async fn list_query(uri: &str) -> Result<ListQuery<PetCriteria>, Response> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (mut parts, _) = request.into_parts();
        ListQuery::<PetCriteria>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_list_query_splits_paging_from_filters() {
        let query = list_query("/pets?page=2&limit=5&sort=age,desc&age.greaterThan=1&name.contains=Rex")
            .await
            .unwrap();

        assert_eq!(query.page.page, 2);
        assert_eq!(query.page.limit, 5);
        assert_eq!(query.page.sort.column, "age");
        assert_eq!(query.page.sort.direction, SortDirection::Desc);
        assert!(query.criteria.age.is_some());
        assert!(query.criteria.name.is_some());
        assert!(query.criteria.species.is_none());
    }

    #[tokio::test]
    async fn test_list_query_defaults() {
        let query = list_query("/pets").await.unwrap();
        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.limit, 20);
        assert_eq!(query.page.sort.column, "id");
        assert_eq!(query.criteria, PetCriteria::new());
    }

    #[tokio::test]
    async fn test_list_query_rejects_bad_input() {
        for uri in [
            "/pets?page=0",
            "/pets?limit=501",
            "/pets?sort=weight",
            "/pets?weight.equals=3",
            "/pets?age.greaterThan=old",
        ] {
            let response = list_query(uri).await.unwrap_err();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[test]
    fn test_validation_code_for_required_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("petId", validator::ValidationError::new("required"));
        assert_eq!(validation_code(&errors), "FIELD_REQUIRED");

        errors.add("age", validator::ValidationError::new("range"));
        assert_eq!(validation_code(&errors), "VALIDATION_ERROR");
    }
}
