//! Field Cleaner Module
//! Per-field coercion of raw CSV text into typed, possibly missing values.

use super::dataset::Record;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date-time layouts tried after the plain date layouts fail.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Named-month layouts ("April 7, 2017", "Apr 7 2017", "7-Apr-2017").
const NAMED_MONTH_FORMATS: [&str; 8] = [
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d-%b-%y",
];

/// Coerce free-text valuation (e.g. `"$1.2B"`) into billions of dollars.
///
/// Every character that is not an ASCII digit or `.` is dropped before
/// parsing. Returns `None` when nothing parseable remains.
pub fn coerce_valuation(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !stripped.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Best-effort calendar-date parser for the join-date column.
///
/// Ambiguous slash dates are read month-first; day-first is only tried when
/// month-first cannot produce a valid date.
pub fn parse_join_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if s.contains('/') {
        if let Some(date) = parse_slash_date(s) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for fmt in NAMED_MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // Bare year
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

/// Slash dates, ignoring any trailing time of day ("4/7/2017 12:00:00 AM").
fn parse_slash_date(s: &str) -> Option<NaiveDate> {
    let s = s.split_whitespace().next()?;
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let candidates: &[&str] = if parts[0].len() == 4 {
        &["%Y/%m/%d"]
    } else {
        match parts[2].len() {
            4 => &["%m/%d/%Y", "%d/%m/%Y"],
            2 => &["%m/%d/%y", "%d/%m/%y"],
            _ => &[],
        }
    };

    candidates
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Normalize a categorical cell: surrounding whitespace kept verbatim,
/// but an all-blank cell counts as missing.
fn category(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty()).map(str::to_string)
}

/// Build a cleaned record from the raw cells of one row.
pub fn clean_record(
    company: Option<&str>,
    country: Option<&str>,
    industry: Option<&str>,
    valuation: Option<&str>,
    date_joined: Option<&str>,
) -> Record {
    let date = date_joined.and_then(parse_join_date);

    Record {
        company: category(company),
        country: category(country),
        industry: category(industry),
        valuation_raw: valuation.map(str::to_string),
        valuation: valuation.and_then(coerce_valuation),
        date_joined: date,
        year_joined: date.map(|d| d.year()),
    }
}
