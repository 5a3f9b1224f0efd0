//! Instants are compared by absolute timestamp and stored with whole second
//! precision. Everything that enters a `Reminder` passes through [`canonical`].

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use thiserror::Error;

/// Text form of an instant, always in UTC
pub const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn canonical(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.with_nanosecond(0).unwrap_or(instant)
}

pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

#[derive(Error, Debug)]
#[error("Instant: `{0}` is malformed, expected the format YYYY-MM-DD HH:MM:SS")]
pub struct InvalidInstantError(String);

pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, InvalidInstantError> {
    NaiveDateTime::parse_from_str(value.trim(), INSTANT_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| InvalidInstantError(value.to_string()))
}
