//! Timestamp utilities.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC instant as RFC 3339 with millisecond precision and a `Z` suffix.
///
/// Example: "2026-01-31T12:45:31.053Z"
pub fn format_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether `ts` has exactly the shape produced by [`format_millis`].
#[cfg(test)]
pub(crate) fn is_utc_millis(ts: &str) -> bool {
    let bytes = ts.as_bytes();
    if bytes.len() != 24 || bytes[19] != b'.' || bytes[23] != b'Z' {
        return false;
    }
    DateTime::parse_from_rfc3339(ts).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_millis_pads_fraction() {
        let at = Utc.with_ymd_and_hms(2026, 1, 31, 12, 45, 31).unwrap()
            + chrono::Duration::milliseconds(5);
        assert_eq!(format_millis(at), "2026-01-31T12:45:31.005Z");
    }

    #[test]
    fn format_millis_truncates_sub_millisecond() {
        let at = Utc.with_ymd_and_hms(2026, 1, 31, 12, 45, 31).unwrap()
            + chrono::Duration::microseconds(53_999);
        assert_eq!(format_millis(at), "2026-01-31T12:45:31.053Z");
    }

    #[test]
    fn format_millis_of_now_has_expected_shape() {
        assert!(is_utc_millis(&format_millis(Utc::now())));
    }

    #[test]
    fn format_millis_round_trips_through_rfc3339() {
        let at = Utc.with_ymd_and_hms(2026, 10, 15, 9, 41, 7).unwrap()
            + chrono::Duration::milliseconds(123);
        let parsed = DateTime::parse_from_rfc3339(&format_millis(at)).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), at);
    }

    #[test]
    fn shape_check_rejects_other_forms() {
        assert!(is_utc_millis("2026-01-31T12:45:31.053Z"));
        assert!(!is_utc_millis("2026-01-31T12:45:31Z"));
        assert!(!is_utc_millis("2026-01-31T12:45:31.053+00:00"));
        assert!(!is_utc_millis("2026-01-31T12:45:31.053123Z"));
        assert!(!is_utc_millis("2026-13-31T12:45:31.053Z"));
        assert!(!is_utc_millis(""));
    }
}
