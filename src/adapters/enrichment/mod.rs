//! Evidence source adapters.
//!
//! - `WebsiteEvidenceSource` - Title, description and operational signals of a site
//! - `ListingEvidenceSource` - Places-details lookup (needs an API key)
//! - `SocialEvidenceSource` - Public profile metadata and follower counts
//! - `MockEvidenceSource` - Configurable source for tests

mod client;
pub mod html;
mod listing_source;
mod mock_source;
mod social_source;
mod target;
mod website_source;

pub use client::{build_client, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
pub use listing_source::{
    ListingEvidenceSource, ListingSourceConfig, PlaceDetails, PlaceDetailsResponse,
    DEFAULT_LISTING_BASE_URL,
};
pub use mock_source::MockEvidenceSource;
pub use social_source::{SocialEvidenceSource, DEFAULT_PROFILE_URL_TEMPLATE};
pub use website_source::WebsiteEvidenceSource;
