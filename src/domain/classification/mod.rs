//! Classification Module - the signal scorer and its vocabulary.
//!
//! # Components
//!
//! - `Archetype` / `MaturityStage` - What the scorer can assign
//! - `WeightTable` - Hand-authored (field, answer) contributions
//! - `SignalScorer` - Pure scoring function over selections + evidence strength
//! - `Classification` - Scorer output with probabilities, confidence and flags
//! - `ClassificationResponse` - Classification plus narrative, evidence, metadata
//!
//! # Design Philosophy
//!
//! Scoring is a stateless pure function. It performs no I/O and never fails
//! for valid selections.

mod archetype;
mod response;
mod scorer;
mod scoring;
mod weights;

pub use archetype::{Archetype, MaturityStage, ARCHETYPE_COUNT, STAGE_COUNT};
pub use response::{ClassificationResponse, NarrativePane, ResponseMetadata};
pub use scorer::{SignalScorer, AMBIGUITY_EPSILON, CLASSIFIER_VERSION, EVIDENCE_WEIGHT};
pub use scoring::{Classification, ClassificationFlag, ScoringInput};
pub use weights::{Contribution, WeightTable, DEFAULT_WEIGHTS};
