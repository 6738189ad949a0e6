//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{appointments, health, health_records, pets};
use crate::api::types::PaginationMeta;
use crate::data::types::{ApptStatus, Gender};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PetCare API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Pets, appointments and health records"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "pets", description = "Pet records"),
        (name = "appointments", description = "Vet appointments"),
        (name = "health-records", description = "Health records from visits")
    ),
    paths(
        health::health,
        // Pets
        pets::list_pets,
        pets::count_pets,
        pets::create_pet,
        pets::get_pet,
        pets::update_pet,
        pets::partial_update_pet,
        pets::delete_pet,
        // Appointments
        appointments::list_appointments,
        appointments::count_appointments,
        appointments::create_appointment,
        appointments::get_appointment,
        appointments::update_appointment,
        appointments::partial_update_appointment,
        appointments::delete_appointment,
        // Health records
        health_records::list_health_records,
        health_records::count_health_records,
        health_records::create_health_record,
        health_records::get_health_record,
        health_records::update_health_record,
        health_records::partial_update_health_record,
        health_records::delete_health_record,
    ),
    components(schemas(
        health::HealthResponse,
        PaginationMeta,
        Gender,
        ApptStatus,
        pets::types::PetDto,
        pets::types::PetPatch,
        appointments::types::AppointmentDto,
        appointments::types::AppointmentPatch,
        health_records::types::HealthRecordDto,
        health_records::types::HealthRecordPatch,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>PetCare API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/health",
            "/api/v1/pets",
            "/api/v1/pets/{id}",
            "/api/v1/appointments/count",
            "/api/v1/health-records/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }
    }

    #[test]
    fn test_patch_schemas_are_registered() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        for name in ["PetPatch", "AppointmentPatch", "HealthRecordPatch"] {
            assert!(schemas[name]["properties"].is_object(), "{}", name);
        }
        assert!(schemas["PetPatch"]["properties"]["ownerId"].is_object());
    }
}
