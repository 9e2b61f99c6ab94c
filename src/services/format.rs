//! Display formatting for the renderer payload
//!
//! The renderer expects pre-formatted strings, so every convention lives
//! here as a named function rather than inline slicing at the call sites.

use chrono::NaiveDate;

/// Formats an ISO `YYYY-MM-DD` date for display, e.g. `"Jul 16 2010"`
/// (month abbreviation, zero-padded day, year — no weekday).
///
/// Returns `None` when the input does not parse as a date.
pub fn display_date(iso: &str) -> Option<String> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%b %d %Y").to_string())
}

/// Formats a runtime in minutes as `"2 hr 28 min"`
pub fn runtime(minutes: u32) -> String {
    format!("{} hr {} min", minutes / 60, minutes % 60)
}

/// Formats an integer with thousands separators, e.g. `12345` → `"12,345"`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2010-07-16"), Some("Jul 16 2010".to_string()));
        assert_eq!(display_date("2010-07-05"), Some("Jul 05 2010".to_string()));
        assert_eq!(display_date("1974-11-11"), Some("Nov 11 1974".to_string()));
    }

    #[test]
    fn test_display_date_rejects_garbage() {
        assert_eq!(display_date(""), None);
        assert_eq!(display_date("not-a-date"), None);
        assert_eq!(display_date("2010-13-40"), None);
    }

    #[test]
    fn test_runtime() {
        assert_eq!(runtime(148), "2 hr 28 min");
        assert_eq!(runtime(90), "1 hr 30 min");
        assert_eq!(runtime(59), "0 hr 59 min");
        assert_eq!(runtime(120), "2 hr 0 min");
        assert_eq!(runtime(0), "0 hr 0 min");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
