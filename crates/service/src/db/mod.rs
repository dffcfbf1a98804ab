//! Database-backed operations, one module per aggregate entry point.

pub mod bike_service;
pub mod service_record_service;
pub mod bill_service;
pub mod booking_service;

use crate::errors::ServiceError;

/// A present, non-blank payload field.
pub(crate) fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::required(field)),
    }
}

/// An optional date field; blank counts as absent.
pub(crate) fn optional_timestamp(
    value: Option<&str>,
    field: &str,
) -> Result<Option<sea_orm::prelude::DateTimeWithTimeZone>, ServiceError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => Ok(Some(models::dates::parse_timestamp(field, raw)?)),
        None => Ok(None),
    }
}
