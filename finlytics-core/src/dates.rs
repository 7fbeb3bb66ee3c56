//! Calendar date parsing for transaction dates and filter bounds.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats tried in order after the ISO and slash forms.
const TEXT_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d-%b-%Y",
];

fn expand_year(y_str: &str) -> Option<i32> {
    let y: i32 = y_str.parse().ok()?;
    match y_str.len() {
        2 if y < 69 => Some(2000 + y),
        2 => Some(1900 + y),
        4 => Some(y),
        _ => None,
    }
}

/// `Y/M/D` when the first segment has four digits, `M/D/Y` otherwise.
fn parse_slashed(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('/').map(str::trim).collect();
    let [a, b, c] = parts.as_slice() else {
        return None;
    };
    if a.len() == 4 {
        let y = expand_year(a)?;
        return NaiveDate::from_ymd_opt(y, b.parse().ok()?, c.parse().ok()?);
    }
    let year = expand_year(c)?;
    NaiveDate::from_ymd_opt(year, a.parse().ok()?, b.parse().ok()?)
}

/// Parse a date string into a calendar date.
///
/// Accepts `YYYY-MM-DD`, ISO/RFC 3339 date-times (date part only),
/// `YYYY/MM/DD`, `M/D/YYYY`, `M/D/YY` and month-name forms such as `5 Jan 2024` or
/// `Jan 5, 2024`. Strings without a year (`Jan 05`) return `None`.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if s.contains('/') {
        return parse_slashed(s);
    }

    TEXT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
