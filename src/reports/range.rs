// Request window parsing and validation against the data actually in the store.

use chrono::{DateTime, NaiveDate};

use crate::error::ReportError;
use crate::models::DataBounds;

/// Closed report window `[start, end]` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: i64,
    pub end: i64,
}

impl ReportWindow {
    /// Parse both bounds and reject `start > end`.
    pub fn parse(start: &str, end: &str) -> Result<Self, ReportError> {
        let start = parse_instant(start)?;
        let end = parse_instant(end)?;
        if start > end {
            return Err(ReportError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }
}

/// `YYYY-MM-DD` (UTC midnight) or an RFC 3339 timestamp, as epoch milliseconds.
pub fn parse_instant(s: &str) -> Result<i64, ReportError> {
    let s = s.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| ReportError::InvalidDate(s.to_string()))
}

/// A single calendar day, `YYYY-MM-DD`.
pub fn parse_day(s: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDay(s.to_string()))
}

/// UTC calendar day of an epoch-millisecond instant.
pub fn utc_day(ms: i64) -> NaiveDate {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

/// Check `[requested_start, requested_end]` lies within `bounds`.
///
/// `bounds == None` means the store holds no records at all, reported as `EmptyStore`
/// rather than a range violation. Both edges are inclusive.
pub fn validate(
    requested_start: i64,
    requested_end: i64,
    bounds: Option<DataBounds>,
) -> Result<(), ReportError> {
    if requested_start > requested_end {
        return Err(ReportError::InvertedRange {
            start: requested_start,
            end: requested_end,
        });
    }
    let Some(bounds) = bounds else {
        return Err(ReportError::EmptyStore);
    };
    if requested_start < bounds.min || requested_end > bounds.max {
        return Err(ReportError::OutOfRange {
            valid_min: utc_day(bounds.min),
            valid_max: utc_day(bounds.max),
        });
    }
    Ok(())
}
