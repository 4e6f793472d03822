//! Deterministic narrative generator.
//!
//! Builds panes from fixed copy keyed by stage and archetype. Used when no
//! model provider is configured, and as the fallback in development.

use async_trait::async_trait;

use crate::domain::classification::{
    Archetype, Classification, ClassificationFlag, MaturityStage, NarrativePane,
};
use crate::domain::evidence::EvidenceNugget;
use crate::ports::{NarrativeError, NarrativeGenerator, NarrativeRequest};

/// Template-based implementation of `NarrativeGenerator`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrativeGenerator;

impl TemplateNarrativeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Renders panes synchronously.
    pub fn render(&self, request: NarrativeRequest<'_>) -> Vec<NarrativePane> {
        let classification = request.classification;
        let subject = request.business_label.unwrap_or("Your business");

        vec![
            snapshot_pane(subject, classification),
            archetype_pane(classification),
            evidence_pane(request.nuggets, classification),
            next_steps_pane(classification.stage),
        ]
    }
}

fn snapshot_pane(subject: &str, classification: &Classification) -> NarrativePane {
    let mut body = format!(
        "{} reads as {} at the {} stage. {}",
        subject,
        classification.top_archetype.display_name(),
        classification.stage.display_name(),
        stage_summary(classification.stage),
    );
    if classification.has_flag(ClassificationFlag::AmbiguousArchetype) {
        body.push_str(&format!(
            " The answers fit {} almost as well.",
            classification.runner_up_archetype.display_name()
        ));
    }
    if classification.has_flag(ClassificationFlag::LowSignal) {
        body.push_str(" The answers gave little to go on, so treat this as a first read.");
    }

    NarrativePane::new("snapshot", "Where you are today", body)
}

fn archetype_pane(classification: &Classification) -> NarrativePane {
    let top = classification.top_archetype;
    let body = format!(
        "{} ({:.0}% match). {}",
        archetype_summary(top),
        classification.probability(top) * 100.0,
        archetype_risk(top),
    );

    NarrativePane::new("archetype", top.display_name(), body)
}

fn evidence_pane(nuggets: &[EvidenceNugget], classification: &Classification) -> NarrativePane {
    let body = if nuggets.is_empty() {
        if classification.has_flag(ClassificationFlag::EnrichmentEmpty) {
            "We could not read anything from the links you shared, so this is based on your answers alone."
                .to_string()
        } else {
            "This read is based on your answers alone. Sharing a website or listing sharpens it."
                .to_string()
        }
    } else {
        let lines: Vec<_> = nuggets
            .iter()
            .map(|nugget| format!("- {}", nugget.content))
            .collect();
        format!(
            "What we found online ({}% confidence overall):\n{}",
            classification.confidence.value(),
            lines.join("\n")
        )
    };

    NarrativePane::new("evidence", "What backs this up", body)
}

fn next_steps_pane(stage: MaturityStage) -> NarrativePane {
    let body = match stage {
        MaturityStage::Analog => {
            "Start with one shared calendar and a simple online presence so customers can find and book you without a phone call."
        }
        MaturityStage::Emerging => {
            "Replace the spreadsheets that hurt most with one system of record, starting with invoicing or scheduling."
        }
        MaturityStage::Connected => {
            "Connect the tools you already have so bookings, invoices and follow-ups stop needing re-entry."
        }
        MaturityStage::Optimized => {
            "Measure what your automation saves and look for the remaining manual handoffs."
        }
    };

    NarrativePane::new("next-steps", "Next steps", body)
}

fn stage_summary(stage: MaturityStage) -> &'static str {
    match stage {
        MaturityStage::Analog => "Most of the work runs on memory, paper and phone calls.",
        MaturityStage::Emerging => "Some digital tools are in place, mostly used in isolation.",
        MaturityStage::Connected => "Core operations run through shared digital systems.",
        MaturityStage::Optimized => "Routine operations largely run themselves.",
    }
}

fn archetype_summary(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::Firefighter => "Every day is spent reacting to whatever is most urgent",
        Archetype::Improviser => "You make it work with whatever is at hand",
        Archetype::Patchworker => "You have tools, but they do not talk to each other",
        Archetype::Operator => "You run a tidy, repeatable operation",
        Archetype::Orchestrator => "Your systems carry the routine so people can focus on the exceptions",
    }
}

fn archetype_risk(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::Firefighter => "The risk is burnout and missed calls when things get busy.",
        Archetype::Improviser => "The risk is that growth outpaces what one person can hold in their head.",
        Archetype::Patchworker => "The risk is double entry and details lost between tools.",
        Archetype::Operator => "The risk is settling for processes that no longer scale.",
        Archetype::Orchestrator => "The risk is over-engineering the parts that still need a human touch.",
    }
}

#[async_trait]
impl NarrativeGenerator for TemplateNarrativeGenerator {
    async fn generate_panes(
        &self,
        request: NarrativeRequest<'_>,
    ) -> Result<Vec<NarrativePane>, NarrativeError> {
        Ok(self.render(request))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
