//! HTTP handlers for classification and cache administration.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::classification::{
    ClassifyBusinessHandler, ClearCacheCommand, ClearCacheHandler, GetCacheStatsHandler,
    GetCacheStatsQuery,
};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::ResponseCache;

use super::dto::{ClassifyRequest, ClearCacheResponse, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for classification endpoints.
#[derive(Clone)]
pub struct ClassifyAppState {
    pub classify_handler: Arc<ClassifyBusinessHandler>,
    pub cache: Arc<dyn ResponseCache>,
    /// Include rejection details in malformed-body errors.
    pub verbose_errors: bool,
}

impl ClassifyAppState {
    pub fn new(classify_handler: Arc<ClassifyBusinessHandler>, cache: Arc<dyn ResponseCache>) -> Self {
        Self {
            classify_handler,
            cache,
            verbose_errors: false,
        }
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn clear_cache_handler(&self) -> ClearCacheHandler {
        ClearCacheHandler::new(self.cache.clone())
    }

    pub fn cache_stats_handler(&self) -> GetCacheStatsHandler {
        GetCacheStatsHandler::new(self.cache.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/classify - Classify a business from intake answers
pub async fn classify(
    State(state): State<ClassifyAppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ClassifyApiError> {
    let Json(request) =
        payload.map_err(|rejection| ClassifyApiError::malformed(rejection, state.verbose_errors))?;
    let cmd = request.into_command()?;

    let response = state.classify_handler.handle(cmd).await;
    Ok(Json(response))
}

/// GET /api/admin/cache - Cache statistics
pub async fn get_cache_stats(State(state): State<ClassifyAppState>) -> impl IntoResponse {
    let stats = state.cache_stats_handler().handle(GetCacheStatsQuery);
    Json(stats)
}

/// POST /api/admin/cache/clear - Remove every cached response
pub async fn clear_cache(State(state): State<ClassifyAppState>) -> impl IntoResponse {
    let result = state.clear_cache_handler().handle(ClearCacheCommand);
    Json(ClearCacheResponse {
        cleared: result.cleared,
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// Errors surfaced by classification endpoints. Both map to 400.
#[derive(Debug)]
pub enum ClassifyApiError {
    Validation(ValidationError),
    MalformedBody { detail: Option<String> },
}

impl ClassifyApiError {
    fn malformed(rejection: JsonRejection, verbose: bool) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected classify body");
        Self::MalformedBody {
            detail: verbose.then(|| rejection.body_text()),
        }
    }
}

impl From<ValidationError> for ClassifyApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl IntoResponse for ClassifyApiError {
    fn into_response(self) -> axum::response::Response {
        let error = match self {
            ClassifyApiError::Validation(err) => {
                tracing::debug!(field = err.field(), error = %err, "Intake validation failed");
                DomainError::from(err)
            }
            ClassifyApiError::MalformedBody { detail } => {
                let error = DomainError::new(
                    ErrorCode::MalformedRequest,
                    "Request body must be a JSON classification request",
                );
                match detail {
                    Some(reason) => error.with_detail("reason", reason),
                    None => error,
                }
            }
        };
        let body = ErrorResponse::from(error);
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::InMemoryResponseCache;
    use crate::adapters::http::classify::classify_router;
    use crate::adapters::narrative::MockNarrativeGenerator;
    use crate::application::handlers::classification::EnrichmentOrchestrator;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> ClassifyAppState {
        let cache: Arc<dyn ResponseCache> = Arc::new(InMemoryResponseCache::with_defaults());
        let handler = ClassifyBusinessHandler::new(
            Arc::new(EnrichmentOrchestrator::default()),
            Arc::new(MockNarrativeGenerator::new()),
            cache.clone(),
        );
        ClassifyAppState::new(Arc::new(handler), cache)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const ANALOG_BODY: &str = r#"{
        "selections": {
            "presenceChannels": ["none"],
            "teamShape": "solo",
            "scheduling": "phone",
            "invoicing": "paper",
            "callHandling": "voicemail",
            "businessFeeling": "overwhelmed"
        }
    }"#;

    #[tokio::test]
    async fn classify_returns_classification() {
        let app = classify_router().with_state(test_state());

        let response = app.oneshot(post_json("/classify", ANALOG_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["classification"]["stage"], "analog");
        assert_eq!(body["metadata"]["cacheHit"], false);
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let app = classify_router().with_state(test_state());

        let response = app
            .oneshot(post_json("/classify", r#"{"selections": {"presenceChannels": ["website"]}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "EMPTY_FIELD");
        assert_eq!(body["details"]["field"], "teamShape");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = classify_router().with_state(test_state());

        let response = app.oneshot(post_json("/classify", "{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "INVALID_BODY");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn verbose_errors_include_rejection_reason() {
        let app = classify_router().with_state(test_state().with_verbose_errors(true));

        let response = app.oneshot(post_json("/classify", "{not json")).await.unwrap();

        let body = json_body(response).await;
        assert!(body["details"]["reason"].is_string());
    }

    #[tokio::test]
    async fn admin_endpoints_report_and_clear() {
        let state = test_state();
        let app = classify_router().with_state(state.clone());

        app.clone().oneshot(post_json("/classify", ANALOG_BODY)).await.unwrap();

        let stats = app
            .clone()
            .oneshot(Request::get("/admin/cache").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(stats).await["entries"], 1);

        let cleared = app
            .oneshot(post_json("/admin/cache/clear", ""))
            .await
            .unwrap();
        assert_eq!(cleared.status(), StatusCode::OK);
        assert_eq!(json_body(cleared).await["cleared"], 1);
        assert!(state.cache.is_empty());
    }
}
