//! Website evidence source.
//!
//! Fetches the business's own site and reports its title, description and
//! the operational capabilities it advertises.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Instant;

use super::client::{read_text, require_success};
use super::html::{self, OperationalSignal};
use super::target::ensure_public_target;
use crate::domain::evidence::{EvidenceNugget, Relevance, SourceKind};
use crate::ports::{EvidenceError, EvidenceSource};

const MAX_DESCRIPTION_CHARS: usize = 200;

/// Evidence source for website references.
#[derive(Debug, Clone)]
pub struct WebsiteEvidenceSource {
    client: Client,
}

impl WebsiteEvidenceSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Turns `example.com`, `www.example.com/about` or a full URL into an
    /// absolute http(s) URL on a public host.
    pub fn normalize_url(reference: &str) -> Result<Url, EvidenceError> {
        let trimmed = reference.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(EvidenceError::invalid_reference(format!(
                "not a website address: {:?}",
                reference
            )));
        }

        let lower = trimmed.to_ascii_lowercase();
        let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let url = Url::parse(&candidate)
            .map_err(|e| EvidenceError::invalid_reference(format!("{}: {}", trimmed, e)))?;

        match url.host_str() {
            Some(host) if host.contains('.') || host.starts_with('[') => {
                ensure_public_target(&url)?;
                Ok(url)
            }
            _ => Err(EvidenceError::invalid_reference(format!(
                "no public host in {:?}",
                trimmed
            ))),
        }
    }

    /// Summarizes a fetched page into a nugget.
    pub fn summarize(page: &str) -> EvidenceNugget {
        let title = html::extract_title(page);
        let description = html::extract_meta(page, "description")
            .or_else(|| html::extract_meta(page, "og:description"));
        let signals = html::detect_signals(page);

        let relevance = website_relevance(title.is_some(), description.is_some(), &signals);

        let mut parts = Vec::new();
        match &title {
            Some(title) => parts.push(format!("Website \"{}\"", title)),
            None => parts.push("Website reachable".to_string()),
        }
        if let Some(description) = &description {
            parts.push(html::truncate(description, MAX_DESCRIPTION_CHARS));
        }
        if signals.is_empty() {
            parts.push("no online operations detected".to_string());
        } else {
            let labels: Vec<_> = signals.iter().map(OperationalSignal::label).collect();
            parts.push(format!("offers {}", labels.join(", ")));
        }

        EvidenceNugget::new(SourceKind::Website, relevance, parts.join(". "))
    }
}

fn website_relevance(
    has_title: bool,
    has_description: bool,
    signals: &[OperationalSignal],
) -> Relevance {
    if has_description && signals.len() >= 2 {
        Relevance::High
    } else if has_title || has_description {
        Relevance::Medium
    } else {
        Relevance::Low
    }
}

#[async_trait]
impl EvidenceSource for WebsiteEvidenceSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Website
    }

    async fn fetch(&self, reference: &str) -> Result<EvidenceNugget, EvidenceError> {
        let url = Self::normalize_url(reference)?;
        let start = Instant::now();

        tracing::debug!(url = %url, "Fetching website evidence");

        let response = self.client.get(url.clone()).send().await?;
        let page = read_text(require_success(response)?).await?;
        let nugget = Self::summarize(&page);

        tracing::debug!(
            url = %url,
            relevance = ?nugget.relevance,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Website evidence collected"
        );

        Ok(nugget)
    }
}
