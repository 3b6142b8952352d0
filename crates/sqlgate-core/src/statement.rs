//! Statement splitting.

/// Statement delimiter.
pub const DELIMITER: char = ';';

/// Split raw SQL text into individual statements.
///
/// Every `;` is a boundary; segments are trimmed and empty ones discarded,
/// so the result never contains an empty string and keeps source order.
/// Delimiters inside string literals are not recognized.
pub fn split(raw: &str) -> Vec<String> {
    raw.split(DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
