//! Display formatting helpers for timestamps and long text.

use chrono::{DateTime, Utc};

/// Long-form date for display, e.g. `"October 16, 2026 at 09:30 AM"`.
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y at %I:%M %p").to_string()
}

/// Compact date used in exports, e.g. `"2026-10-16 09:30"`. Contains no commas.
#[must_use]
pub fn format_export_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Cuts `text` to `max_len` characters and appends `"..."` when it is longer.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let t = Utc.with_ymd_and_hms(2026, 10, 6, 21, 5, 0).unwrap();
        assert_eq!(format_date(t), "October 6, 2026 at 09:05 PM");
        assert_eq!(format_export_date(t), "2026-10-06 21:05");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hindi", 5), "Hindi");
        assert_eq!(truncate_text("Hindi", 10), "Hindi");
        assert_eq!(truncate_text("Conversational Urdu", 14), "Conversational...");
        // Multi-byte characters are never split
        assert_eq!(truncate_text("हिन्दी", 2), "हि...");
    }
}
