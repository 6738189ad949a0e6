//! Shared API types
//!
//! Common types used across all API endpoints including error handling,
//! pagination, and sorting.

use axum::Json;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::core::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, TOTAL_COUNT_HEADER};
use crate::data::filters::FilterError;
use crate::data::types::{Page, PageRequest, Sort, SortDirection};
use crate::data::{DataError, Record};
use crate::domain::ServiceError;

/// Validator function for page parameter
pub fn validate_page(page: u32) -> Result<(), ValidationError> {
    if page < 1 {
        return Err(ValidationError::new("page_min").with_message("Page must be >= 1".into()));
    }
    Ok(())
}

/// Validator function for limit parameter
pub fn validate_limit(limit: u32) -> Result<(), ValidationError> {
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(ValidationError::new("limit_range")
            .with_message(format!("Limit must be between 1 and {}", MAX_PAGE_LIMIT).into()));
    }
    Ok(())
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    MethodNotAllowed { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn from_data(e: DataError) -> Self {
        tracing::error!(error = %e, backend = e.backend(), "Data error");
        Self::internal("Database operation failed")
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation { code, message } => Self::bad_request(code, message),
            ServiceError::NotFound { kind, id } => {
                Self::not_found("RECORD_NOT_FOUND", format!("{} not found: {}", kind, id))
            }
            ServiceError::MethodNotAllowed(message) => Self::method_not_allowed(message),
            ServiceError::Data(e) => Self::from_data(e),
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(e: FilterError) -> Self {
        Self::bad_request(e.code(), e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::MethodNotAllowed { message } => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method_not_allowed",
                "METHOD_NOT_ALLOWED".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

pub fn default_page() -> u32 {
    DEFAULT_PAGE
}

pub fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

/// Paging keys of a list query; every other key is a filter
#[derive(Debug, Deserialize, Validate)]
pub struct PagingQuery {
    #[serde(default = "default_page")]
    #[validate(custom(function = "validate_page"))]
    pub page: u32,

    #[serde(default = "default_limit")]
    #[validate(custom(function = "validate_limit"))]
    pub limit: u32,

    /// `field` or `field,asc` / `field,desc`
    pub sort: Option<String>,
}

impl PagingQuery {
    /// Query keys consumed by paging
    pub const KEYS: &'static [&'static str] = &["page", "limit", "sort"];

    /// Resolve into a page request, mapping the sort field to its column
    pub fn to_page_request<R: Record>(&self) -> Result<PageRequest, ApiError> {
        let sort = match &self.sort {
            Some(s) => parse_sort::<R>(s)?,
            None => Sort::by_id(),
        };
        Ok(PageRequest::new(self.page, self.limit, sort))
    }
}

/// Parse `field[,asc|desc]` against the wire fields of `R`
pub fn parse_sort<R: Record>(s: &str) -> Result<Sort, ApiError> {
    let (field, direction) = match s.split_once(',') {
        None => (s, SortDirection::Asc),
        Some((field, dir)) => match dir.trim().to_ascii_lowercase().as_str() {
            "asc" => (field, SortDirection::Asc),
            "desc" => (field, SortDirection::Desc),
            _ => {
                return Err(ApiError::bad_request(
                    "INVALID_SORT",
                    "Invalid sort format. Use 'field', 'field,asc' or 'field,desc'",
                ));
            }
        },
    };

    let column = R::column_for(field.trim()).ok_or_else(|| {
        ApiError::bad_request(
            "INVALID_SORT_FIELD",
            format!("Cannot sort {} by: {}", R::KIND, field),
        )
    })?;

    Ok(Sort { column, direction })
}

/// Pagination metadata in response
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u32, limit: u32, total_items: u64) -> Self {
        Self {
            page,
            limit,
            total_items,
            total_pages: total_items.div_ceil(u64::from(limit.max(1))),
        }
    }
}

/// Generic paginated response wrapper
///
/// Also carries the total in the `X-Total-Count` header.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u32, limit: u32, total_items: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(page, limit, total_items),
        }
    }

    /// Wrap a store page, converting each record
    pub fn from_page<R>(page: Page<R>, request: &PageRequest) -> Self
    where
        T: From<R>,
    {
        let page = page.map(T::from);
        Self::new(page.items, request.page, request.limit, page.total)
    }
}

impl<T: Serialize> IntoResponse for PaginatedResponse<T> {
    fn into_response(self) -> Response {
        let total = HeaderValue::from(self.meta.total_items);
        (
            [(HeaderName::from_static(TOTAL_COUNT_HEADER), total)],
            Json(self),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Pet;

    #[test]
    fn test_pagination_meta_rounds_up() {
        let meta = PaginationMeta::new(1, 20, 41);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(PaginationMeta::new(1, 20, 0).total_pages, 0);
    }

    #[test]
    fn test_parse_sort() {
        let sort = parse_sort::<Pet>("ownerId,desc").unwrap();
        assert_eq!(sort.column, "owner_id");
        assert_eq!(sort.direction, SortDirection::Desc);

        let sort = parse_sort::<Pet>("name").unwrap();
        assert_eq!(sort.column, "name");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_parse_sort_rejects_unknown_field() {
        let err = parse_sort::<Pet>("owner_id").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { ref code, .. } if code == "INVALID_SORT_FIELD"));

        let err = parse_sort::<Pet>("name,sideways").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { ref code, .. } if code == "INVALID_SORT"));
    }

    #[test]
    fn test_paging_limits() {
        assert!(validate_page(0).is_err());
        assert!(validate_page(7).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(MAX_PAGE_LIMIT).is_ok());
        assert!(validate_limit(MAX_PAGE_LIMIT + 1).is_err());
    }

    #[test]
    fn test_service_error_mapping() {
        let err: ApiError = ServiceError::NotFound { kind: "Pet", id: 4 }.into();
        assert!(matches!(err, ApiError::NotFound { ref message, .. } if message == "Pet not found: 4"));

        let err: ApiError = ServiceError::validation("ID_NULL", "Invalid id").into();
        assert!(matches!(err, ApiError::BadRequest { ref code, .. } if code == "ID_NULL"));

        let err: ApiError = FilterError::UnknownField("weight".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest { ref code, .. } if code == "UNKNOWN_FILTER_FIELD"));
    }
}
