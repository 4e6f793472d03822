//! Classification HTTP adapter - intake endpoint plus cache administration.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{ClassifyApiError, ClassifyAppState};
pub use routes::classify_router;
