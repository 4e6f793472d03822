//! Request and response DTOs for classification endpoints.
//!
//! Intake answers arrive as optional strings; the domain validator reports
//! missing or unknown answers by field name.

use serde::{Deserialize, Serialize};

use crate::application::handlers::classification::ClassifyBusinessCommand;
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::intake::{EvidenceReferences, SelectionAnswers, Selections};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/classify`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub selections: Option<SelectionsRequest>,
    pub references: Option<ReferencesRequest>,
    pub business_label: Option<String>,
}

/// The six intake answers, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionsRequest {
    pub presence_channels: Option<Vec<String>>,
    pub team_shape: Option<String>,
    pub scheduling: Option<String>,
    pub invoicing: Option<String>,
    pub call_handling: Option<String>,
    pub business_feeling: Option<String>,
}

/// Optional evidence references.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencesRequest {
    pub website: Option<String>,
    pub listing: Option<String>,
    pub social: Option<String>,
}

impl SelectionsRequest {
    pub fn answers(&self) -> SelectionAnswers<'_> {
        SelectionAnswers {
            presence_channels: self.presence_channels.as_deref(),
            team_shape: self.team_shape.as_deref(),
            scheduling: self.scheduling.as_deref(),
            invoicing: self.invoicing.as_deref(),
            call_handling: self.call_handling.as_deref(),
            business_feeling: self.business_feeling.as_deref(),
        }
    }
}

impl From<ReferencesRequest> for EvidenceReferences {
    fn from(request: ReferencesRequest) -> Self {
        EvidenceReferences::new(request.website, request.listing, request.social)
    }
}

impl ClassifyRequest {
    /// Validates the body and builds the application command.
    pub fn into_command(self) -> Result<ClassifyBusinessCommand, ValidationError> {
        let selections = Selections::parse(self.selections.unwrap_or_default().answers())?;
        let references = self.references.map(EvidenceReferences::from).unwrap_or_default();

        let mut cmd = ClassifyBusinessCommand::new(selections).with_references(references);
        if let Some(label) = self.business_label {
            cmd = cmd.with_business_label(label);
        }
        Ok(cmd)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/admin/cache/clear`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: usize,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Structured error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let code = err.code.to_string();
        if err.details.is_empty() {
            return Self::new(code, err.message);
        }
        let details = err
            .details
            .into_iter()
            .map(|(key, value)| (key, serde_json::Value::String(value)))
            .collect::<serde_json::Map<_, _>>();
        Self::with_details(code, err.message, serde_json::Value::Object(details))
    }
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        DomainError::from(err.clone()).into()
    }
}
