use shared::utils::new_session_id;
use shared::{Language, Location};

/// Renders a card number as `4111 XXXX XXXX 1234`.
///
/// Only the first and last four digits survive; numbers with fewer than
/// eight digits are masked entirely.
pub fn mask_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 8 {
        return "XXXX XXXX XXXX XXXX".to_string();
    }
    let head: String = digits[..4].iter().collect();
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("{head} XXXX XXXX {tail}")
}

/// Identity of one user of the agent.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub card_number_masked: String,
}

impl Session {
    pub fn new(card_number: &str) -> Self {
        Self::with_id(new_session_id(), card_number)
    }

    pub fn with_id(id: impl Into<String>, card_number: &str) -> Self {
        Self {
            id: id.into(),
            card_number_masked: mask_card_number(card_number),
        }
    }
}

/// State of a single query. Each step of the agent takes it and hands it
/// back, so the reasoning log belongs to exactly one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub session: Session,
    pub location: Location,
    pub language: Language,
    pub document: Option<String>,
    pub reasoning_log: Vec<String>,
}

impl RequestContext {
    pub fn new(session: Session, location: Location, language: Language) -> Self {
        Self {
            session,
            location,
            language,
            document: None,
            reasoning_log: Vec::new(),
        }
    }

    pub fn with_document(mut self, text: impl Into<String>) -> Self {
        self.document = Some(text.into());
        self
    }

    pub fn log(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        tracing::info!(session = %self.session.id, step = %line, "agent step");
        self.reasoning_log.push(line);
        self
    }
}
