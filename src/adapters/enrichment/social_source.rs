//! Social profile evidence source.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::client::{read_text, require_success};
use super::html;
use super::target::ensure_public_target;
use crate::domain::evidence::{EvidenceNugget, Relevance, SourceKind};
use crate::ports::{EvidenceError, EvidenceSource};

/// Default profile URL template; `{handle}` is substituted.
pub const DEFAULT_PROFILE_URL_TEMPLATE: &str = "https://www.instagram.com/{handle}/";

/// Follower count at which a profile is strong evidence.
const HIGH_FOLLOWER_COUNT: u64 = 1_000;

const MAX_DESCRIPTION_CHARS: usize = 200;

/// Evidence source for social handles or profile URLs.
#[derive(Debug, Clone)]
pub struct SocialEvidenceSource {
    client: Client,
    profile_url_template: String,
}

impl SocialEvidenceSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            profile_url_template: DEFAULT_PROFILE_URL_TEMPLATE.to_string(),
        }
    }

    pub fn with_profile_url_template(mut self, template: impl Into<String>) -> Self {
        self.profile_url_template = template.into();
        self
    }

    /// Resolves `@handle`, `handle` or a profile URL to the URL to fetch.
    ///
    /// Profile URLs must point at the template's host.
    pub fn profile_url(&self, reference: &str) -> Result<Url, EvidenceError> {
        let trimmed = reference.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(trimmed)
                .map_err(|e| EvidenceError::invalid_reference(format!("{}: {}", trimmed, e)))?;
            let expected = self.template_host()?;
            if url.host_str() != Some(expected.as_str()) {
                return Err(EvidenceError::invalid_reference(format!(
                    "profile URL must be on {}",
                    expected
                )));
            }
            ensure_public_target(&url)?;
            return Ok(url);
        }

        let handle = trimmed.trim_start_matches('@');
        let valid = !handle.is_empty()
            && handle
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(EvidenceError::invalid_reference(format!(
                "not a social handle: {:?}",
                reference
            )));
        }

        let url = self.profile_url_template.replace("{handle}", handle);
        let url = Url::parse(&url)
            .map_err(|e| EvidenceError::invalid_reference(format!("{}: {}", url, e)))?;
        ensure_public_target(&url)?;
        Ok(url)
    }

    fn template_host(&self) -> Result<String, EvidenceError> {
        let sample = self.profile_url_template.replace("{handle}", "handle");
        Url::parse(&sample)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .ok_or_else(|| EvidenceError::invalid_reference("profile URL template has no host"))
    }

    /// Summarizes a fetched profile page into a nugget.
    pub fn summarize(page: &str) -> EvidenceNugget {
        let title = html::extract_meta(page, "og:title").or_else(|| html::extract_title(page));
        let description = html::extract_meta(page, "og:description")
            .or_else(|| html::extract_meta(page, "description"));
        let followers = description
            .as_deref()
            .and_then(html::parse_follower_count)
            .or_else(|| html::parse_follower_count(page));

        let relevance = match followers {
            Some(count) if count >= HIGH_FOLLOWER_COUNT => Relevance::High,
            _ if description.is_some() => Relevance::Medium,
            _ => Relevance::Low,
        };

        let mut parts = vec![match &title {
            Some(title) => format!("Social profile \"{}\"", title),
            None => "Social profile found".to_string(),
        }];
        if let Some(count) = followers {
            parts.push(format!("{} followers", count));
        }
        if let Some(description) = &description {
            parts.push(html::truncate(description, MAX_DESCRIPTION_CHARS));
        }

        EvidenceNugget::new(SourceKind::Social, relevance, parts.join(". "))
    }
}

#[async_trait]
impl EvidenceSource for SocialEvidenceSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Social
    }

    async fn fetch(&self, reference: &str) -> Result<EvidenceNugget, EvidenceError> {
        let url = self.profile_url(reference)?;

        tracing::debug!(url = %url, "Fetching social evidence");

        let response = self.client.get(url).send().await?;
        let page = read_text(require_success(response)?).await?;

        Ok(Self::summarize(&page))
    }
}
