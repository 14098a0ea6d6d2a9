//! Static rule table consulted by the benefit resolver.
//!
//! Adding a location, a document rule or a translation only touches the
//! constants below; the resolver walks the table generically.

use crate::benefit::{Language, Location};

/// Canned benefit offered when the query mentions one of the location's keywords.
#[derive(Debug, Clone, Copy)]
pub struct LocationRule {
    pub location: Location,
    pub keywords: &'static [&'static str],
    pub benefit: &'static str,
    pub details: &'static str,
    pub condition: &'static str,
}

/// Benefit that fires only when both the query and the uploaded document match.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRule {
    pub query_keywords: &'static [&'static str],
    pub document_keyword: &'static str,
    pub benefit: &'static str,
    pub details: &'static str,
    pub condition: &'static str,
}

/// Localized rendering of a canonical English benefit title.
#[derive(Debug, Clone, Copy)]
pub struct Translation {
    pub language: Language,
    pub canonical: &'static str,
    pub localized: &'static str,
}

pub const LOCATION_RULES: &[LocationRule] = &[
    LocationRule {
        location: Location::IitMadrasMainGate,
        keywords: &["food", "dining", "restaurant", "cafe", "meal", "eat"],
        benefit: "Campus Dining Cashback",
        details: "Get 15% cashback on all dining transactions within IIT Madras campus including canteens, food courts, and campus restaurants.",
        condition: "Minimum spend of ₹200 per transaction. Valid at all campus dining locations.",
    },
    LocationRule {
        location: Location::ChennaiAirport,
        keywords: &["lounge", "airport", "travel", "flight", "baggage"],
        benefit: "Airport Lounge Access",
        details: "Complimentary access to Chennai Airport Premium Lounges with your Visa Platinum card. Enjoy comfortable seating, refreshments, and Wi-Fi while you wait for your flight.",
        condition: "Valid for cardholder + 1 guest. Present your Visa card at lounge entrance.",
    },
    LocationRule {
        location: Location::PhoenixMall,
        keywords: &["shopping", "retail", "purchase", "buy", "store"],
        benefit: "Phoenix Mall Exclusive Discount",
        details: "Receive 10% instant discount on purchases above ₹5,000 at any retail outlet in Phoenix Mall, Chennai. Additional 5% cashback on fashion and lifestyle brands.",
        condition: "Discount applied at point of sale. Cannot be combined with other offers.",
    },
];

/// Evaluated in order; the first rule whose query and document keywords both match wins.
pub const DOCUMENT_RULES: &[DocumentRule] = &[
    DocumentRule {
        query_keywords: &["lounge"],
        document_keyword: "lounge",
        benefit: "Airport Lounge Access",
        details: "Complimentary access to over 1,000 airport lounges worldwide with your Visa card. Enjoy premium amenities including refreshments, Wi-Fi, and comfortable seating.",
        condition: "Valid for primary cardholder. Guest access subject to lounge policy.",
    },
    DocumentRule {
        query_keywords: &["travel", "insurance"],
        document_keyword: "travel",
        benefit: "Travel Insurance Coverage",
        details: "Automatic travel insurance coverage up to $500,000 for accidents during trips booked with your Visa card. Includes medical expenses, trip cancellation, and lost baggage protection.",
        condition: "Trip must be booked using the Visa card. Coverage applies for trips up to 90 days.",
    },
    DocumentRule {
        query_keywords: &["cashback", "reward"],
        document_keyword: "cashback",
        benefit: "Cashback Rewards Program",
        details: "Earn 5% cashback on dining transactions, 2% on grocery shopping, and 1% on all other purchases. Cashback is credited to your account monthly.",
        condition: "Cashback capped at ₹5,000 per month. Minimum transaction of ₹500 applies.",
    },
    DocumentRule {
        query_keywords: &["protect", "fraud"],
        document_keyword: "protection",
        benefit: "Zero Liability Protection",
        details: "You are not responsible for unauthorized transactions on your Visa card. Report suspicious activity immediately for full protection.",
        condition: "Must report unauthorized charges within 60 days of statement date.",
    },
];

pub const TRANSLATIONS: &[Translation] = &[
    Translation {
        language: Language::Tamil,
        canonical: "Campus Dining Cashback",
        localized: "வளாக உணவக பணத்திரும்பல்",
    },
    Translation {
        language: Language::Tamil,
        canonical: "Airport Lounge Access",
        localized: "விமான நிலைய ஓய்வறை அணுகல்",
    },
    Translation {
        language: Language::Tamil,
        canonical: "Phoenix Mall Exclusive Discount",
        localized: "பீனிக்ஸ் மால் பிரத்யேக தள்ளுபடி",
    },
    Translation {
        language: Language::Tamil,
        canonical: "Travel Insurance Coverage",
        localized: "பயண காப்பீடு கவரேஜ்",
    },
    Translation {
        language: Language::Tamil,
        canonical: "Cashback Rewards Program",
        localized: "பணத்திரும்பல் வெகுமதி திட்டம்",
    },
    Translation {
        language: Language::Tamil,
        canonical: "Zero Liability Protection",
        localized: "பூஜ்யம் பொறுப்பு பாதுகாப்பு",
    },
];

/// Borrowed view over a set of rules. The resolver accepts any table so
/// callers can swap in their own data.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<'a> {
    pub locations: &'a [LocationRule],
    pub documents: &'a [DocumentRule],
    pub translations: &'a [Translation],
}

impl RuleTable<'static> {
    /// The table compiled into the binary.
    pub const fn builtin() -> Self {
        Self {
            locations: LOCATION_RULES,
            documents: DOCUMENT_RULES,
            translations: TRANSLATIONS,
        }
    }
}

impl<'a> RuleTable<'a> {
    pub fn location_rule(&self, location: Location) -> Option<&'a LocationRule> {
        self.locations.iter().find(|r| r.location == location)
    }

    /// Localized title for `canonical`, if the table has one for `language`.
    pub fn localize(&self, canonical: &str, language: Language) -> Option<&'a str> {
        if language.is_default() {
            return None;
        }
        self.translations
            .iter()
            .find(|t| t.language == language && t.canonical == canonical)
            .map(|t| t.localized)
    }
}
