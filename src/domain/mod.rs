//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, timestamp, percentage)
//! - `intake` - Questionnaire vocabularies, validated selections, fingerprints
//! - `evidence` - Evidence nuggets and evidence strength
//! - `classification` - Weight table, signal scorer, classification response

pub mod classification;
pub mod evidence;
pub mod foundation;
pub mod intake;
