//! Properties of the resolver over every location and language.

use shared::benefit::{SOURCE_DEFAULT, SOURCE_DOCUMENT, SOURCE_LOCATION};
use shared::rules::RuleTable;
use shared::{resolve, Language, Location};
use strum::IntoEnumIterator;

fn long_document(keyword: &str) -> String {
    format!(
        "Visa Platinum terms and conditions. Benefits include {keyword} for eligible cardholders. \
         Offers are subject to change without notice and apply to primary accounts only."
    )
}

#[test]
fn empty_query_yields_default_for_every_location() {
    for location in Location::iter() {
        for language in Language::iter() {
            let b = resolve("", location, language, None);
            assert_eq!(b.benefit, format!("{location} - Special Visa Benefit"));
            assert_eq!(b.source, SOURCE_DEFAULT);
            assert!(b.details.contains(&location.to_string()));
        }
    }
}

#[test]
fn location_keywords_match_case_insensitively() {
    let table = RuleTable::builtin();
    for location in Location::iter() {
        let rule = table.location_rule(location).unwrap();
        for keyword in rule.keywords {
            let query = format!("ANY {} NEARBY?", keyword.to_uppercase());
            let b = resolve(&query, location, Language::English, None);
            assert_eq!(b.benefit, rule.benefit, "query {query:?} at {location}");
            assert_eq!(b.source, SOURCE_LOCATION);
        }
    }
}

#[test]
fn long_lounge_document_overrides_location_match() {
    let doc = long_document("lounge access");
    assert!(doc.chars().count() > 100);
    for location in Location::iter() {
        let b = resolve("lounge please", location, Language::English, Some(&doc));
        assert_eq!(b.benefit, "Airport Lounge Access");
        assert_eq!(b.source, SOURCE_DOCUMENT);
    }
}

#[test]
fn short_document_never_reaches_document_rules() {
    for location in Location::iter() {
        let b = resolve("lounge", location, Language::English, Some("lounge"));
        assert_ne!(b.source, SOURCE_DOCUMENT);
    }
}

#[test]
fn localization_only_touches_the_title() {
    let doc = long_document("cashback");
    let english = resolve("cashback", Location::PhoenixMall, Language::English, Some(&doc));
    let tamil = resolve("cashback", Location::PhoenixMall, Language::Tamil, Some(&doc));
    assert_eq!(tamil.benefit, "பணத்திரும்பல் வெகுமதி திட்டம்");
    assert_eq!(tamil.details, english.details);
    assert_eq!(tamil.condition, english.condition);
    assert_eq!(tamil.source, english.source);
}

#[test]
fn resolver_never_returns_empty_title() {
    let queries = ["", "food", "lounge", "buy", "fraud", "???"];
    for location in Location::iter() {
        for language in Language::iter() {
            for q in queries {
                assert!(!resolve(q, location, language, None).benefit.is_empty());
            }
        }
    }
}
