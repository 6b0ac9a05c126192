// Report failures. Consistency problems in the data are warnings, not errors (see reports::intervals).

use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A date or instant in the request could not be parsed.
    #[error("Invalid date format. Please provide valid startDate and endDate in the format YYYY-MM-DD.")]
    InvalidDate(String),

    /// The `{date}` path segment of a single-day request could not be parsed.
    #[error("Invalid date format. Please provide the date in the format YYYY-MM-DD.")]
    InvalidDay(String),

    #[error("Invalid date range. startDate should not be after endDate.")]
    InvertedRange { start: i64, end: i64 },

    #[error("Given date is invalid or no data found for the specified date")]
    NoDataForDate(NaiveDate),

    #[error("No uptime data found")]
    NoIntervals,

    /// The event stream has no records at all, so there is no valid range to check against.
    #[error("No analytical data found in the database.")]
    EmptyStore,

    #[error("Date range should be between {valid_min} and {valid_max}.")]
    OutOfRange {
        valid_min: NaiveDate,
        valid_max: NaiveDate,
    },

    #[error("storage: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ReportError {
    /// The request itself is at fault: unparseable, inverted or outside the stored data.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidDate(_)
                | ReportError::InvalidDay(_)
                | ReportError::InvertedRange { .. }
                | ReportError::OutOfRange { .. }
        )
    }

    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            ReportError::NoDataForDate(_) | ReportError::NoIntervals | ReportError::EmptyStore
        )
    }
}
