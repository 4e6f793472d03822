//! Adapters - Implementations of port interfaces.
//!
//! - `cache` - In-memory bounded response cache
//! - `enrichment` - Website, listing and social evidence sources
//! - `narrative` - Template and Anthropic narrative generators
//! - `http` - Axum REST surface

pub mod cache;
pub mod enrichment;
pub mod http;
pub mod narrative;
