//! HTTP adapters - REST API implementations.

pub mod classify;
mod router;

pub use classify::{classify_router, ClassifyAppState};
pub use router::{build_router, HttpSettings};
