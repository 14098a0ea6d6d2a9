use serde::{Deserialize, Serialize};

use crate::benefit::{Benefit, Language, Location};

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const PROCESSING_FAILED: &str = "Failed to process benefit verification";

/// Validated body of `POST /verify-benefit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitRequest {
    pub query: String,
    pub location: Location,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
}

/// Body as received, before required fields are checked.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBenefitRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub pdf_content: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
}

impl RawBenefitRequest {
    /// Returns `None` when a required field is absent, empty, or not one of
    /// the known locations/languages.
    pub fn validate(self) -> Option<BenefitRequest> {
        let query = self.query.filter(|q| !q.is_empty())?;
        let location = self.location.filter(|l| !l.is_empty())?.parse().ok()?;
        let language = self.language.filter(|l| !l.is_empty())?.parse().ok()?;
        Some(BenefitRequest {
            query,
            location,
            language,
            pdf_content: self.pdf_content,
            card_number: self.card_number,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitEnvelope {
    pub benefit: Benefit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Returned by `POST /documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUploaded {
    pub filename: String,
    pub file_size: i64,
    pub content: String,
    pub context_chars: usize,
    pub session_id: String,
}

/// Append-only record of an uploaded terms document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedDocument {
    pub filename: String,
    pub file_size: i64,
    pub content: String,
    pub user_session: String,
}

/// Append-only record of one answered query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenefitQueryLog {
    pub card_number_masked: String,
    pub location: Location,
    pub language: Language,
    pub query: String,
    pub benefit_response: Benefit,
    pub reasoning_log: Vec<String>,
    pub user_session: String,
}
