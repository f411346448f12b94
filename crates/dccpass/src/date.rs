//! Date normalization for certificate claims.
//!
//! DCC dates come in several shapes: full dates (`2021-05-01`), date-times
//! with offsets (`2021-05-01T10:27:15+02:00`), and partial birth dates
//! (`1964-08`, `1964`, or empty). Wallet apps can only localize full
//! instants, so every full date is pinned to midday UTC.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Time appended to every normalized date.
pub const MIDDAY_UTC_SUFFIX: &str = "T12:00:00Z";

/// Normalize a date-like claim into `YYYY-MM-DDT12:00:00Z`.
///
/// Inputs of ten or more characters keep their first ten characters, with no
/// calendar validation. Shorter inputs pass through unchanged unless they are
/// a strict `YYYY-MM-DD` date. Never fails.
///
/// ```
/// use dccpass::date::normalize_date;
///
/// assert_eq!(normalize_date("2021-06-01T08:30:00+02:00"), "2021-06-01T12:00:00Z");
/// assert_eq!(normalize_date("1964-08"), "1964-08");
/// ```
pub fn normalize_date(input: &str) -> String {
    let prefix: String = input.chars().take(10).collect();

    if input.chars().count() >= 10 || is_full_date(&prefix) {
        format!("{prefix}{MIDDAY_UTC_SUFFIX}")
    } else {
        input.to_string()
    }
}

/// Matches `YYYY-MM-DD` with a 19xx or 20xx year.
fn is_full_date(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return false;
    }
    let digits = [0, 1, 2, 3, 5, 6, 8, 9];
    if !digits.iter().all(|&i| b[i].is_ascii_digit()) {
        return false;
    }
    matches!(&b[0..2], b"19" | b"20")
}

/// Add `days` to a normalized instant and render it the way wallet apps
/// expect (`YYYY-MM-DDTHH:MM:SS.sssZ`).
///
/// Returns `None` when the input is not a full RFC 3339 instant, which is the
/// case for partial dates that [`normalize_date`] passed through.
pub fn expiration_after(normalized: &str, days: i64) -> Option<String> {
    let start = DateTime::parse_from_rfc3339(normalized).ok()?;
    let end = start.with_timezone(&Utc) + Duration::days(days);
    Some(end.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Re-render a normalized instant in the same form as [`expiration_after`].
pub fn as_expiration(normalized: &str) -> Option<String> {
    expiration_after(normalized, 0)
}
