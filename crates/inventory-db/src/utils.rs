//! Shared utility functions

use chrono::{DateTime, Utc};

/// Parse a datetime string (RFC3339 format) or return current time
///
/// Timestamps are stored as RFC3339 text; a row written by another tool with
/// a malformed value still loads instead of failing the whole query.
pub fn parse_datetime_or_now(s: &str) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Check that a name is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`)
///
/// Used for table/view names that come from configuration and therefore
/// cannot be bound as query parameters.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_or_now() {
        let valid_time = "2024-01-01T12:00:00Z";
        let parsed = parse_datetime_or_now(valid_time);
        assert_eq!(parsed.to_rfc3339(), "2024-01-01T12:00:00+00:00");

        let invalid_time = "invalid";
        let now_before = Utc::now();
        let parsed = parse_datetime_or_now(invalid_time);
        let now_after = Utc::now();
        assert!(parsed >= now_before && parsed <= now_after);
    }

    #[test]
    fn test_is_plain_identifier() {
        assert!(is_plain_identifier("most_added_products"));
        assert!(is_plain_identifier("_v1"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("1table"));
        assert!(!is_plain_identifier("products; DROP TABLE products"));
        assert!(!is_plain_identifier("main.products"));
    }
}
