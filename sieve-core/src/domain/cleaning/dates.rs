// sieve-core/src/domain/cleaning/dates.rs
//
// Lenient date parsing. Anything we cannot read becomes `None` (fail open).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

fn re_numeric_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,4})[-/.](\d{1,2})[-/.](\d{1,4})$").unwrap_or_else(|_| {
            // Fallback to a regex that never matches
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const NAMED_MONTH_FORMATS: [&str; 6] = [
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Expands a two-digit year the way `strptime("%y")` does (69-99 -> 19xx).
fn full_year(digits: &str) -> Option<i32> {
    let year: i32 = digits.parse().ok()?;
    match digits.len() {
        4 => Some(year),
        2 if year >= 69 => Some(1900 + year),
        2 => Some(2000 + year),
        _ => None,
    }
}

fn parse_numeric(value: &str) -> Option<NaiveDate> {
    let caps = re_numeric_date().captures(value)?;
    let (a, b, c) = (&caps[1], &caps[2], &caps[3]);

    if a.len() == 4 {
        // Y-M-D, Y/M/D, Y.M.D
        return NaiveDate::from_ymd_opt(a.parse().ok()?, b.parse().ok()?, c.parse().ok()?);
    }

    let year = full_year(c)?;
    let first: u32 = a.parse().ok()?;
    let second: u32 = b.parse().ok()?;

    // Month first, day first only when the month reading is impossible.
    NaiveDate::from_ymd_opt(year, first, second)
        .or_else(|| NaiveDate::from_ymd_opt(year, second, first))
}

pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = parse_numeric(value) {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(value, "%Y%m%d").ok();
    }

    NAMED_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_and_separators() {
        assert_eq!(parse_date(Some("2023-01-15")), ymd(2023, 1, 15));
        assert_eq!(parse_date(Some(" 2023/02/20 ")), ymd(2023, 2, 20));
        assert_eq!(parse_date(Some("2023.3.5")), ymd(2023, 3, 5));
    }

    #[test]
    fn test_month_first_then_day_first() {
        assert_eq!(parse_date(Some("03/15/2023")), ymd(2023, 3, 15));
        assert_eq!(parse_date(Some("05/03/2023")), ymd(2023, 5, 3));
        assert_eq!(parse_date(Some("15/03/2023")), ymd(2023, 3, 15));
        assert_eq!(parse_date(Some("15-03-2023")), ymd(2023, 3, 15));
        assert_eq!(parse_date(Some("01/02/23")), ymd(2023, 1, 2));
    }

    #[test]
    fn test_datetimes() {
        assert_eq!(parse_date(Some("2023-04-01 10:30:00")), ymd(2023, 4, 1));
        assert_eq!(parse_date(Some("2023-04-01T10:30:00")), ymd(2023, 4, 1));
        assert_eq!(parse_date(Some("2023-04-01T10:30:00Z")), ymd(2023, 4, 1));
        assert_eq!(parse_date(Some("2023-04-01 10:30")), ymd(2023, 4, 1));
    }

    #[test]
    fn test_named_months_and_compact() {
        assert_eq!(parse_date(Some("Jan 5, 2023")), ymd(2023, 1, 5));
        assert_eq!(parse_date(Some("January 5, 2023")), ymd(2023, 1, 5));
        assert_eq!(parse_date(Some("5 January 2023")), ymd(2023, 1, 5));
        assert_eq!(parse_date(Some("20230105")), ymd(2023, 1, 5));
    }

    #[test]
    fn test_unparseable_fails_open() {
        assert_eq!(parse_date(Some("not a date")), None);
        assert_eq!(parse_date(Some("2023-02-30")), None);
        assert_eq!(parse_date(Some("13/13/2023")), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(None), None);
    }
}
