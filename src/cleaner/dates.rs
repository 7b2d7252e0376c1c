//! Release date parsing.
//!
//! Unparseable values map to `None`; a bad date never fails a run.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a Release_Date cell with the given chrono layouts.
///
/// Surrounding whitespace is ignored. A bare four-digit year is read as
/// January 1 of that year. Full timestamps (`2020-01-01 10:00:00`, RFC 3339)
/// are reduced to their date.
pub fn parse_release_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|timestamp| timestamp.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}
