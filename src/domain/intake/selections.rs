//! Validated intake selections.

use serde::Serialize;
use std::collections::BTreeSet;

use super::values::{
    BusinessFeeling, CallHandling, Invoicing, PresenceChannel, Scheduling, TeamShape,
};
use crate::domain::foundation::ValidationError;

/// Raw answers as submitted, before validation.
///
/// Every field is optional here so that a missing answer surfaces as a
/// validation error naming the field rather than a deserialization failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionAnswers<'a> {
    pub presence_channels: Option<&'a [String]>,
    pub team_shape: Option<&'a str>,
    pub scheduling: Option<&'a str>,
    pub invoicing: Option<&'a str>,
    pub call_handling: Option<&'a str>,
    pub business_feeling: Option<&'a str>,
}

/// A complete, validated set of intake answers.
///
/// Immutable once constructed. Presence channels are held as an ordered set
/// so that submission order never influences scoring or fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selections {
    presence_channels: BTreeSet<PresenceChannel>,
    team_shape: TeamShape,
    scheduling: Scheduling,
    invoicing: Invoicing,
    call_handling: CallHandling,
    business_feeling: BusinessFeeling,
}

impl Selections {
    /// Builds selections from already-typed answers.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if no presence channel is given. `none` may sit
    /// alongside real channels.
    pub fn new(
        presence_channels: impl IntoIterator<Item = PresenceChannel>,
        team_shape: TeamShape,
        scheduling: Scheduling,
        invoicing: Invoicing,
        call_handling: CallHandling,
        business_feeling: BusinessFeeling,
    ) -> Result<Self, ValidationError> {
        let presence_channels: BTreeSet<_> = presence_channels.into_iter().collect();

        if presence_channels.is_empty() {
            return Err(ValidationError::empty_field(PresenceChannel::FIELD));
        }

        Ok(Self {
            presence_channels,
            team_shape,
            scheduling,
            invoicing,
            call_handling,
            business_feeling,
        })
    }

    /// Validates raw answers, reporting the first missing or unknown field.
    pub fn parse(answers: SelectionAnswers<'_>) -> Result<Self, ValidationError> {
        let raw_channels = answers
            .presence_channels
            .ok_or_else(|| ValidationError::empty_field(PresenceChannel::FIELD))?;
        let presence_channels = raw_channels
            .iter()
            .map(|raw| PresenceChannel::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            presence_channels,
            required(answers.team_shape, TeamShape::FIELD, TeamShape::parse)?,
            required(answers.scheduling, Scheduling::FIELD, Scheduling::parse)?,
            required(answers.invoicing, Invoicing::FIELD, Invoicing::parse)?,
            required(answers.call_handling, CallHandling::FIELD, CallHandling::parse)?,
            required(answers.business_feeling, BusinessFeeling::FIELD, BusinessFeeling::parse)?,
        )
    }

    pub fn presence_channels(&self) -> &BTreeSet<PresenceChannel> {
        &self.presence_channels
    }

    pub fn team_shape(&self) -> TeamShape {
        self.team_shape
    }

    pub fn scheduling(&self) -> Scheduling {
        self.scheduling
    }

    pub fn invoicing(&self) -> Invoicing {
        self.invoicing
    }

    pub fn call_handling(&self) -> CallHandling {
        self.call_handling
    }

    pub fn business_feeling(&self) -> BusinessFeeling {
        self.business_feeling
    }

    /// True when the only presence answer is `none`.
    pub fn lacks_digital_presence(&self) -> bool {
        self.presence_channels
            .iter()
            .all(|channel| *channel == PresenceChannel::NoPresence)
    }

    /// Canonical `field=value` rendering, stable across submission order.
    pub fn canonical_form(&self) -> String {
        let channels = self
            .presence_channels
            .iter()
            .map(PresenceChannel::as_str)
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}={}|{}={}|{}={}|{}={}|{}={}|{}={}",
            PresenceChannel::FIELD,
            channels,
            TeamShape::FIELD,
            self.team_shape,
            Scheduling::FIELD,
            self.scheduling,
            Invoicing::FIELD,
            self.invoicing,
            CallHandling::FIELD,
            self.call_handling,
            BusinessFeeling::FIELD,
            self.business_feeling,
        )
    }
}

fn required<T>(
    raw: Option<&str>,
    field: &'static str,
    parse: fn(&str) -> Result<T, ValidationError>,
) -> Result<T, ValidationError> {
    match raw {
        Some(value) => parse(value),
        None => Err(ValidationError::empty_field(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn full_answers(channels: &[String]) -> SelectionAnswers<'_> {
        SelectionAnswers {
            presence_channels: Some(channels),
            team_shape: Some("solo"),
            scheduling: Some("phone"),
            invoicing: Some("paper"),
            call_handling: Some("voicemail"),
            business_feeling: Some("overwhelmed"),
        }
    }

    #[test]
    fn parse_accepts_complete_answers() {
        let channels = owned(&["website", "social"]);
        let selections = Selections::parse(full_answers(&channels)).unwrap();

        assert_eq!(selections.team_shape(), TeamShape::Solo);
        assert_eq!(selections.presence_channels().len(), 2);
        assert!(!selections.lacks_digital_presence());
    }

    #[test]
    fn parse_reports_missing_field_by_name() {
        let channels = owned(&["website"]);
        let answers = SelectionAnswers {
            invoicing: None,
            ..full_answers(&channels)
        };

        let err = Selections::parse(answers).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("invoicing"));
    }

    #[test]
    fn parse_rejects_missing_presence_channels() {
        let answers = SelectionAnswers {
            presence_channels: None,
            ..full_answers(&[])
        };
        assert_eq!(
            Selections::parse(answers).unwrap_err(),
            ValidationError::empty_field("presenceChannels")
        );
    }

    #[test]
    fn parse_rejects_empty_presence_channels() {
        let channels: Vec<String> = vec![];
        let err = Selections::parse(full_answers(&channels)).unwrap_err();
        assert_eq!(err.field(), "presenceChannels");
    }

    #[test]
    fn parse_rejects_unknown_channel() {
        let channels = owned(&["website", "billboard"]);
        let err = Selections::parse(full_answers(&channels)).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownValue { .. }));
    }

    #[test]
    fn none_alongside_real_channel_is_accepted() {
        let channels = owned(&["none", "website"]);
        let selections = Selections::parse(full_answers(&channels)).unwrap();

        assert_eq!(selections.presence_channels().len(), 2);
        assert!(!selections.lacks_digital_presence());
    }

    #[test]
    fn duplicate_channels_collapse() {
        let channels = owned(&["website", "Website", "website"]);
        let selections = Selections::parse(full_answers(&channels)).unwrap();
        assert_eq!(selections.presence_channels().len(), 1);
    }

    #[test]
    fn only_none_lacks_digital_presence() {
        let channels = owned(&["none"]);
        let selections = Selections::parse(full_answers(&channels)).unwrap();
        assert!(selections.lacks_digital_presence());
    }

    #[test]
    fn canonical_form_ignores_channel_order() {
        let a = owned(&["social", "website", "listing"]);
        let b = owned(&["listing", "social", "website"]);
        let first = Selections::parse(full_answers(&a)).unwrap();
        let second = Selections::parse(full_answers(&b)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.canonical_form(), second.canonical_form());
        assert!(first
            .canonical_form()
            .starts_with("presenceChannels=website,listing,social|teamShape=solo"));
    }
}
