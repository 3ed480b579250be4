//! Sortable UTC timestamps for naming artifacts.

use chrono::{DateTime, Utc};

/// `strftime` pattern behind every timestamp, e.g. `2024-03-07_142305`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Current UTC time as `YYYY-MM-DD_HHMMSS`.
///
/// Fixed width, so lexical order matches chronological order.
pub fn timestamp_str() -> String {
    format_timestamp(&Utc::now())
}

/// Format a specific instant with [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use regex::Regex;

    const PATTERN: &str = r"^\d{4}-\d{2}-\d{2}_\d{6}$";

    #[test]
    fn test_known_instant() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 23, 5).unwrap();
        assert_eq!(format_timestamp(&at), "2024-03-07_142305");
    }

    #[test]
    fn test_midnight_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(1999, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&at), "1999-01-02_000000");
    }

    #[test]
    fn test_now_matches_pattern() {
        let re = Regex::new(PATTERN).unwrap();
        let stamp = timestamp_str();
        assert!(re.is_match(&stamp), "unexpected timestamp {stamp}");
    }

    #[test]
    fn test_successive_calls_do_not_go_backwards() {
        let first = timestamp_str();
        let second = timestamp_str();
        assert!(first <= second, "{first} > {second}");
    }

    proptest! {
        #[test]
        fn prop_shape_and_order(a in 0i64..253_402_300_799, b in 0i64..253_402_300_799) {
            let re = Regex::new(PATTERN).unwrap();
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            let early = format_timestamp(&Utc.timestamp_opt(early, 0).unwrap());
            let late = format_timestamp(&Utc.timestamp_opt(late, 0).unwrap());

            prop_assert!(re.is_match(&early));
            prop_assert!(re.is_match(&late));
            prop_assert!(early <= late);
        }
    }
}
