//! Benefit data model shared by the resolver, the HTTP service and the agent.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Source label for benefits matched against an uploaded terms document.
pub const SOURCE_DOCUMENT: &str = "Uploaded Terms & Conditions Document";
/// Source label for location matches when a document was supplied.
pub const SOURCE_LOCATION_WITH_DOCUMENT: &str = "Based on location context and uploaded documents";
/// Source label for location matches without any document.
pub const SOURCE_LOCATION: &str = "Demo / Sample Benefit (Location-based)";
/// Source label for the generic per-location benefit.
pub const SOURCE_DEFAULT: &str = "Demo / Sample Benefit";
/// Source label used by the agent when the verification service is unreachable.
pub const SOURCE_UNAVAILABLE: &str = "Demo / Sample Benefit (AI service unavailable)";

/// Simulated physical location of the cardholder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum Location {
    #[serde(rename = "IIT Madras Main Gate")]
    #[strum(serialize = "IIT Madras Main Gate")]
    IitMadrasMainGate,
    #[serde(rename = "Chennai Airport")]
    #[strum(serialize = "Chennai Airport")]
    ChennaiAirport,
    #[serde(rename = "Phoenix Mall")]
    #[strum(serialize = "Phoenix Mall")]
    PhoenixMall,
}

/// Language the benefit title is rendered in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum Language {
    #[default]
    English,
    Tamil,
}

impl Language {
    /// English is the locale the rule table is written in.
    pub fn is_default(self) -> bool {
        self == Language::English
    }
}

/// Structured answer returned for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub benefit: String,
    pub details: String,
    pub condition: String,
    pub source: String,
}

impl Benefit {
    pub fn new(
        benefit: impl Into<String>,
        details: impl Into<String>,
        condition: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            benefit: benefit.into(),
            details: details.into(),
            condition: condition.into(),
            source: source.into(),
        }
    }

    /// Benefit shown by callers when the verification backend cannot be reached.
    pub fn fallback(location: Location) -> Self {
        Self::new(
            "Demo: Location-Based Cashback",
            format!(
                "As you're at {location}, enjoy special cashback benefits on your Visa card transactions."
            ),
            "As per Visa Terms & Conditions",
            SOURCE_UNAVAILABLE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn location_names_round_trip() {
        for loc in Location::iter() {
            assert_eq!(Location::from_str(&loc.to_string()).unwrap(), loc);
            let json = serde_json::to_string(&loc).unwrap();
            assert_eq!(json, format!("\"{loc}\""));
        }
        let name: &str = Location::IitMadrasMainGate.as_ref();
        assert_eq!(name, "IIT Madras Main Gate");
    }

    #[test]
    fn unknown_location_is_rejected() {
        assert!(Location::from_str("Marina Beach").is_err());
        assert!(Language::from_str("Hindi").is_err());
    }

    #[test]
    fn fallback_is_labelled_unavailable() {
        let b = Benefit::fallback(Location::PhoenixMall);
        assert_eq!(b.benefit, "Demo: Location-Based Cashback");
        assert!(b.details.contains("Phoenix Mall"));
        assert_eq!(b.source, SOURCE_UNAVAILABLE);
    }
}
