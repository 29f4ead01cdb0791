use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::common::constants::MDY_FORMAT;

/// Parse the `MM/DD/YYYY` form used by the agenda feed. Malformed or empty
/// input is absent, never an error.
pub fn parse_mdy(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, MDY_FORMAT).ok()
}

/// Parse the ISO-8601 forms used by the merged feed. A trailing `Z` is
/// treated as `+00:00`; offset-free timestamps and bare dates are accepted
/// too. Only the calendar date is kept.
pub fn parse_iso(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let rfc3339 = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => raw.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&rfc3339) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
