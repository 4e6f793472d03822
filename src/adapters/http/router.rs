//! Top-level router: API routes, health check and tower-http layers.

use std::time::Duration;

use axum::{routing::get, Json, Router};
use http::{header, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::classify::{classify_router, ClassifyAppState, HealthResponse};
use crate::config::AppConfig;

/// Cross-cutting HTTP settings applied as layers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors_origins: Vec<String>,
    /// With no configured origins, allow any origin instead of none.
    pub allow_any_origin: bool,
    pub request_timeout: Duration,
    pub enable_tracing: bool,
}

impl HttpSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cors_origins: config.server.cors_origins_list(),
            allow_any_origin: !config.is_production(),
            request_timeout: config.server.request_timeout(),
            enable_tracing: config.features.enable_tracing,
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            allow_any_origin: false,
            request_timeout: Duration::from_secs(30),
            enable_tracing: true,
        }
    }
}

/// Build the complete application router.
///
/// - `GET /health`
/// - `/api/*` classification and admin routes
pub fn build_router(state: ClassifyAppState, settings: &HttpSettings) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", classify_router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(&settings.cors_origins, settings.allow_any_origin))
                .layer(TimeoutLayer::new(settings.request_timeout)),
        );

    if settings.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// GET /health - Liveness
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn cors_layer(origins: &[String], allow_any_origin: bool) -> CorsLayer {
    if origins.is_empty() && allow_any_origin {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
