//! Utility helpers used throughout the backend services.

/// True when `haystack` contains any of the `needles` as a plain substring.
///
/// No tokenization is applied, so `"eating"` matches the keyword `"eat"`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Length in characters rather than bytes; Tamil text is multi-byte.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Opaque per-user session identifier, e.g. `session_3f2a...`.
pub fn new_session_id() -> String {
    format!("session_{}", uuid::Uuid::new_v4().simple())
}

/// Appends `sslmode=disable` unless the URL already sets an sslmode.
pub fn ensure_sslmode_disable(url: &str) -> String {
    if url.to_ascii_lowercase().contains("sslmode=") {
        return url.to_string();
    }

    if url.contains('?') {
        format!("{url}&sslmode=disable")
    } else {
        format!("{url}?sslmode=disable")
    }
}
