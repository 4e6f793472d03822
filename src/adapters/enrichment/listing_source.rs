//! Listing evidence source backed by a Places-details style JSON API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::client::require_success;
use crate::domain::evidence::{EvidenceNugget, Relevance, SourceKind};
use crate::ports::{EvidenceError, EvidenceSource};

/// Default details endpoint.
pub const DEFAULT_LISTING_BASE_URL: &str =
    "https://maps.googleapis.com/maps/api/place/details/json";

const DETAIL_FIELDS: &str = "name,rating,user_ratings_total,website,opening_hours";

/// Review count at which a listing is strong evidence.
const HIGH_REVIEW_COUNT: u32 = 25;

/// Review count at which a listing is moderate evidence.
const MEDIUM_REVIEW_COUNT: u32 = 5;

/// Configuration for the listing source.
#[derive(Debug, Clone)]
pub struct ListingSourceConfig {
    api_key: Secret<String>,
    pub base_url: String,
}

impl ListingSourceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: DEFAULT_LISTING_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Evidence source for listing (place identifier) references.
pub struct ListingEvidenceSource {
    config: ListingSourceConfig,
    client: Client,
}

impl ListingEvidenceSource {
    pub fn new(config: ListingSourceConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Validates a place identifier.
    fn place_id(reference: &str) -> Result<&str, EvidenceError> {
        let trimmed = reference.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if valid {
            Ok(trimmed)
        } else {
            Err(EvidenceError::invalid_reference(format!(
                "not a place identifier: {:?}",
                reference
            )))
        }
    }

    /// Interprets a details response.
    pub fn summarize(response: PlaceDetailsResponse) -> Result<EvidenceNugget, EvidenceError> {
        if response.status != "OK" {
            return Err(EvidenceError::not_found(format!(
                "listing lookup returned {}",
                response.status
            )));
        }
        let details = response
            .result
            .ok_or_else(|| EvidenceError::parse("listing response without result"))?;

        let reviews = details.user_ratings_total.unwrap_or(0);
        let relevance = if reviews >= HIGH_REVIEW_COUNT {
            Relevance::High
        } else if reviews >= MEDIUM_REVIEW_COUNT {
            Relevance::Medium
        } else {
            Relevance::Low
        };

        let mut parts = vec![match &details.name {
            Some(name) => format!("Listing \"{}\"", name),
            None => "Listing found".to_string(),
        }];
        match details.rating {
            Some(rating) => parts.push(format!("rated {:.1} from {} reviews", rating, reviews)),
            None => parts.push(format!("{} reviews", reviews)),
        }
        if details.opening_hours.is_some() {
            parts.push("publishes opening hours".to_string());
        }
        if details.website.is_some() {
            parts.push("links a website".to_string());
        }

        Ok(EvidenceNugget::new(
            SourceKind::Listing,
            relevance,
            parts.join("; "),
        ))
    }
}

/// Top-level details response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

/// The fields requested from the details endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub website: Option<String>,
    pub opening_hours: Option<serde_json::Value>,
}

#[async_trait]
impl EvidenceSource for ListingEvidenceSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Listing
    }

    async fn fetch(&self, reference: &str) -> Result<EvidenceNugget, EvidenceError> {
        let place_id = Self::place_id(reference)?;

        tracing::debug!(place_id, "Fetching listing evidence");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("place_id", place_id),
                ("fields", DETAIL_FIELDS),
                ("key", self.config.api_key()),
            ])
            .send()
            .await?;

        let details: PlaceDetailsResponse = require_success(response)?
            .json()
            .await
            .map_err(|e| EvidenceError::parse(format!("Failed to parse listing: {}", e)))?;

        Self::summarize(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> PlaceDetailsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = ListingSourceConfig::new("places-key").with_base_url("http://localhost:9000");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.api_key(), "places-key");
    }

    #[test]
    fn place_ids_are_validated() {
        assert_eq!(
            ListingEvidenceSource::place_id(" ChIJN1t_tDeuEmsRUsoyG83frY4 ").unwrap(),
            "ChIJN1t_tDeuEmsRUsoyG83frY4"
        );
        assert!(ListingEvidenceSource::place_id("").is_err());
        assert!(ListingEvidenceSource::place_id("a place?").is_err());
    }

    #[test]
    fn well_reviewed_listing_is_high_relevance() {
        let nugget = ListingEvidenceSource::summarize(response(
            r#"{"status":"OK","result":{"name":"Smith Plumbing","rating":4.63,
                "user_ratings_total":132,"website":"https://smith.example",
                "opening_hours":{"open_now":true}}}"#,
        ))
        .unwrap();

        assert_eq!(nugget.source_kind, SourceKind::Listing);
        assert_eq!(nugget.relevance, Relevance::High);
        assert_eq!(
            nugget.content,
            "Listing \"Smith Plumbing\"; rated 4.6 from 132 reviews; publishes opening hours; links a website"
        );
    }

    #[test]
    fn relevance_follows_review_count() {
        let medium = ListingEvidenceSource::summarize(response(
            r#"{"status":"OK","result":{"user_ratings_total":5}}"#,
        ))
        .unwrap();
        let low = ListingEvidenceSource::summarize(response(
            r#"{"status":"OK","result":{"name":"New Shop"}}"#,
        ))
        .unwrap();

        assert_eq!(medium.relevance, Relevance::Medium);
        assert_eq!(low.relevance, Relevance::Low);
        assert!(low.content.contains("0 reviews"));
    }

    #[test]
    fn non_ok_status_is_not_found() {
        let err = ListingEvidenceSource::summarize(response(r#"{"status":"NOT_FOUND"}"#))
            .unwrap_err();
        assert!(matches!(err, EvidenceError::NotFound(_)));
    }

    #[test]
    fn ok_without_result_is_parse_error() {
        let err = ListingEvidenceSource::summarize(response(r#"{"status":"OK"}"#)).unwrap_err();
        assert!(matches!(err, EvidenceError::Parse(_)));
    }
}
