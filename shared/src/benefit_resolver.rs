//! Resolves a free-text question into exactly one [`Benefit`].
//!
//! Stages run in a fixed order and the first one that produces a benefit
//! wins:
//! 1. document rules, when a real document (more than
//!    [`DOCUMENT_MIN_CHARS`] characters) was uploaded
//! 2. the keyword rule of the current location
//! 3. a generic benefit naming the location
//!
//! The title of the result is then localized. Details, condition and source
//! stay in English.

use tracing::debug;

use crate::benefit::{
    Benefit, Language, Location, SOURCE_DEFAULT, SOURCE_DOCUMENT, SOURCE_LOCATION,
    SOURCE_LOCATION_WITH_DOCUMENT,
};
use crate::rules::RuleTable;
use crate::utils::{char_len, contains_any};

/// Uploaded text must be longer than this to count as a document.
pub const DOCUMENT_MIN_CHARS: usize = 100;

/// Inputs of a single resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInput<'a> {
    pub query: &'a str,
    pub location: Location,
    pub language: Language,
    pub document: Option<&'a str>,
}

impl<'a> ResolveInput<'a> {
    fn has_document(&self) -> bool {
        self.document.is_some_and(|d| !d.is_empty())
    }

    fn real_document(&self) -> Option<&'a str> {
        self.document.filter(|d| char_len(d) > DOCUMENT_MIN_CHARS)
    }
}

/// Lowercased copies shared by the matching stages.
struct Normalized {
    query: String,
    document: Option<String>,
}

type Stage = fn(&RuleTable<'_>, &ResolveInput<'_>, &Normalized) -> Option<Benefit>;

const STAGES: &[(&str, Stage)] = &[("document", document_stage), ("location", location_stage)];

/// Resolves against the built-in rule table.
pub fn resolve(query: &str, location: Location, language: Language, document: Option<&str>) -> Benefit {
    resolve_with(
        &RuleTable::builtin(),
        &ResolveInput {
            query,
            location,
            language,
            document,
        },
    )
}

pub fn resolve_with(table: &RuleTable<'_>, input: &ResolveInput<'_>) -> Benefit {
    let normalized = Normalized {
        query: input.query.to_lowercase(),
        document: input.real_document().map(str::to_lowercase),
    };

    let matched = STAGES.iter().find_map(|(name, stage)| {
        let hit = stage(table, input, &normalized)?;
        debug!(stage = *name, benefit = %hit.benefit, "benefit rule matched");
        Some(hit)
    });
    let benefit = matched.unwrap_or_else(|| {
        debug!(stage = "default", location = %input.location, "no rule matched");
        default_benefit(input.location)
    });

    localize(table, benefit, input.language)
}

fn document_stage(table: &RuleTable<'_>, _input: &ResolveInput<'_>, n: &Normalized) -> Option<Benefit> {
    let document = n.document.as_deref()?;
    table
        .documents
        .iter()
        .find(|rule| contains_any(&n.query, rule.query_keywords) && document.contains(rule.document_keyword))
        .map(|rule| Benefit::new(rule.benefit, rule.details, rule.condition, SOURCE_DOCUMENT))
}

fn location_stage(table: &RuleTable<'_>, input: &ResolveInput<'_>, n: &Normalized) -> Option<Benefit> {
    let rule = table.location_rule(input.location)?;
    if !contains_any(&n.query, rule.keywords) {
        return None;
    }
    let source = if input.has_document() {
        SOURCE_LOCATION_WITH_DOCUMENT
    } else {
        SOURCE_LOCATION
    };
    Some(Benefit::new(rule.benefit, rule.details, rule.condition, source))
}

fn default_benefit(location: Location) -> Benefit {
    Benefit::new(
        format!("{location} - Special Visa Benefit"),
        format!(
            "As a Visa cardholder at {location}, you may be eligible for exclusive benefits. \
             Common benefits include cashback on transactions, purchase protection, and special merchant offers in this area."
        ),
        "As per Visa Terms & Conditions. Contact customer service for specific details.",
        SOURCE_DEFAULT,
    )
}

fn localize(table: &RuleTable<'_>, mut benefit: Benefit, language: Language) -> Benefit {
    if let Some(title) = table.localize(&benefit.benefit, language) {
        benefit.benefit = title.to_string();
    }
    benefit
}
