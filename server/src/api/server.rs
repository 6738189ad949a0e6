//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{appointments, health, health_records, pets};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::data::TransactionalService;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(
            host.parse()
                .with_context(|| format!("Invalid server host: {}", host))?,
            port,
        );

        let router = build_router(app.database.clone(), &allowed_origins, app.config.debug);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(%addr, "API server listening");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        tracing::debug!("API server stopped");
        Ok(app)
    }
}

/// Full application router
///
/// With `debug`, request spans and responses are traced at info instead of debug.
pub fn build_router(
    database: Arc<TransactionalService>,
    allowed_origins: &AllowedOrigins,
    debug: bool,
) -> Router {
    let level = if debug { Level::INFO } else { Level::DEBUG };
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(level))
        .on_response(DefaultOnResponse::new().level(level));

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/api/docs") }))
        .route(
            "/api/v1/health",
            get(health::health).with_state(database.clone()),
        )
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .nest("/api/v1/pets", pets::routes(&database))
        .nest("/api/v1/appointments", appointments::routes(&database))
        .nest("/api/v1/health-records", health_records::routes(&database))
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(trace)
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::api::routes::testing::send;

    fn router() -> Router {
        build_router(
            Arc::new(TransactionalService::memory()),
            &AllowedOrigins::new("127.0.0.1", 5390),
            false,
        )
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let response = send(&router(), Method::GET, "/api/v1/health", None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], "ok");
        assert_eq!(response.body["database"], "memory");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = send(&router(), Method::GET, "/api/v1/owners", None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"], "not_found");
        assert_eq!(response.body["code"], "ROUTE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = send(&router(), Method::GET, "/api/openapi.json", None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["info"]["title"], "PetCare API");
    }

    #[tokio::test]
    async fn test_resources_share_one_store() {
        let router = router();
        let response = send(
            &router,
            Method::POST,
            "/api/v1/pets",
            Some(json!({"ownerId": 1, "name": "Rex"})),
        )
        .await;
        assert_eq!(response.status, StatusCode::CREATED);

        let response = send(&router, Method::GET, "/api/v1/pets/count", None).await;
        assert_eq!(response.body, json!(1));
        let response = send(&router, Method::GET, "/api/v1/appointments/count", None).await;
        assert_eq!(response.body, json!(0));
    }
}
