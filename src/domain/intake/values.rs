//! Closed vocabularies for the intake questionnaire.
//!
//! Every answer the intake accepts is a variant of one of these enums. The
//! wire form is the snake_case string clients submit; parsing is
//! case-insensitive and tolerates `-` in place of `_`.

/// Generates an intake vocabulary enum with wire names, parsing and display.
macro_rules! intake_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Name of the intake field this vocabulary answers.
            pub const FIELD: &'static str = $field;

            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Parses a submitted answer.
            pub fn parse(raw: &str) -> Result<Self, $crate::domain::foundation::ValidationError> {
                let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
                match normalized.as_str() {
                    $($wire => Ok($name::$variant),)+
                    "" => Err($crate::domain::foundation::ValidationError::empty_field($field)),
                    _ => Err($crate::domain::foundation::ValidationError::unknown_value(
                        $field,
                        raw.trim(),
                        &[$($wire),+],
                    )),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::foundation::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

intake_vocabulary! {
    /// Where customers can find the business online.
    PresenceChannel, field = "presenceChannels" {
        Website => "website",
        /// Map / directory listing (e.g. a business profile).
        Listing => "listing",
        Social => "social",
        /// No online presence at all. Never combined with another channel.
        NoPresence => "none",
    }
}

intake_vocabulary! {
    /// Size and shape of the team running the business.
    TeamShape, field = "teamShape" {
        Solo => "solo",
        /// Two to five people.
        SmallTeam => "small_team",
        /// Six to twenty people.
        GrowingTeam => "growing_team",
        Established => "established",
    }
}

intake_vocabulary! {
    /// How appointments and jobs get booked.
    Scheduling, field = "scheduling" {
        Phone => "phone",
        Paper => "paper",
        SharedCalendar => "shared_calendar",
        OnlineBooking => "online_booking",
        NotApplicable => "not_applicable",
    }
}

intake_vocabulary! {
    /// How the business bills its customers.
    Invoicing, field = "invoicing" {
        Paper => "paper",
        Spreadsheet => "spreadsheet",
        AccountingSoftware => "accounting_software",
        Automated => "automated",
    }
}

intake_vocabulary! {
    /// What happens when a customer calls.
    CallHandling, field = "callHandling" {
        Voicemail => "voicemail",
        OwnerAnswers => "owner_answers",
        Staff => "staff",
        AnsweringService => "answering_service",
        Automated => "automated",
    }
}

intake_vocabulary! {
    /// The owner's own read on how the business feels right now.
    BusinessFeeling, field = "businessFeeling" {
        Overwhelmed => "overwhelmed",
        Stuck => "stuck",
        Steady => "steady",
        Growing => "growing",
        Thriving => "thriving",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn parse_accepts_wire_names() {
        assert_eq!(TeamShape::parse("small_team").unwrap(), TeamShape::SmallTeam);
        assert_eq!(Scheduling::parse("online_booking").unwrap(), Scheduling::OnlineBooking);
        assert_eq!(PresenceChannel::parse("none").unwrap(), PresenceChannel::NoPresence);
    }

    #[test]
    fn parse_is_lenient_about_case_and_dashes() {
        assert_eq!(CallHandling::parse(" Owner-Answers ").unwrap(), CallHandling::OwnerAnswers);
        assert_eq!(Invoicing::parse("ACCOUNTING_SOFTWARE").unwrap(), Invoicing::AccountingSoftware);
    }

    #[test]
    fn parse_rejects_unknown_values_with_vocabulary() {
        let err = BusinessFeeling::parse("ecstatic").unwrap_err();
        match err {
            ValidationError::UnknownValue { field, value, expected } => {
                assert_eq!(field, "businessFeeling");
                assert_eq!(value, "ecstatic");
                assert!(expected.contains("thriving"));
            }
            other => panic!("Expected UnknownValue, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_blank_as_empty_field() {
        assert_eq!(
            Invoicing::parse("   ").unwrap_err(),
            ValidationError::empty_field("invoicing")
        );
    }

    #[test]
    fn all_lists_every_variant_in_order() {
        assert_eq!(TeamShape::ALL.len(), 4);
        assert_eq!(TeamShape::ALL[0], TeamShape::Solo);
        assert_eq!(CallHandling::ALL.len(), 5);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Scheduling::SharedCalendar).unwrap();
        assert_eq!(json, "\"shared_calendar\"");
        let back: Scheduling = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Scheduling::SharedCalendar);
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(PresenceChannel::Listing.to_string(), "listing");
        assert_eq!("growing".parse::<BusinessFeeling>().unwrap(), BusinessFeeling::Growing);
    }
}
