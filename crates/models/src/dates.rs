//! Lenient date parsing for payload fields.
//!
//! The front-end sends either plain calendar dates (`2024-02-01`) or full
//! RFC 3339 timestamps; both are accepted everywhere.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::errors::ModelError;

pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ModelError> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| ModelError::Validation(format!("{field} must be a date (YYYY-MM-DD)")))
}

/// Calendar dates become midnight UTC.
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTimeWithTimeZone, ModelError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ModelError::Validation(format!("{field} must be a date or RFC 3339 timestamp")))?;
    let midnight = day.and_time(NaiveTime::MIN).and_utc();
    Ok(midnight.fixed_offset())
}

pub fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}
