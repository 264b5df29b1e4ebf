//! Position text normalization
//!
//! Older roster files stored positions as a serialized list (`['ST', 'MF']`).
//! Only the first entry is meaningful to the balancer.

const QUOTES: &[char] = &['\'', '"'];

/// Canonicalize free-form position text.
///
/// Bracketed list artifacts yield their first element; the result is trimmed
/// and uppercased. Non-conforming text passes through (uppercased) so the
/// caller can report it; empty input yields an empty string.
pub fn normalize_position(raw: &str) -> String {
    let mut text = raw.trim().trim_matches(QUOTES).trim();

    if text.starts_with('[') || text.ends_with(']') {
        text = text.trim_start_matches('[').trim_end_matches(']');
        text = text.split(',').next().unwrap_or_default();
    }

    text.trim().trim_matches(QUOTES).trim().to_uppercase()
}
