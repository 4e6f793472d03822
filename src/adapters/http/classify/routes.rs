//! Axum router configuration for classification endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{classify, clear_cache, get_cache_stats, ClassifyAppState};

/// Create the classification API router.
///
/// # Routes
///
/// - `POST /classify` - Classify intake answers, with optional evidence references
///
/// ## Admin Endpoints
/// - `GET /admin/cache` - Cache statistics
/// - `POST /admin/cache/clear` - Remove every cached response
///
/// Suitable for nesting under `/api`.
pub fn classify_router() -> Router<ClassifyAppState> {
    Router::new()
        .route("/classify", post(classify))
        // Admin endpoints
        .route("/admin/cache", get(get_cache_stats))
        .route("/admin/cache/clear", post(clear_cache))
}
