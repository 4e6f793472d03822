//! Narrative generator adapters.
//!
//! - `TemplateNarrativeGenerator` - Deterministic copy keyed by stage and archetype
//! - `AnthropicNarrativeGenerator` - Claude Messages API
//! - `MockNarrativeGenerator` - Configurable generator for tests

mod anthropic_generator;
mod mock_generator;
mod template_generator;

pub use anthropic_generator::{AnthropicNarrativeConfig, AnthropicNarrativeGenerator};
pub use mock_generator::MockNarrativeGenerator;
pub use template_generator::TemplateNarrativeGenerator;
