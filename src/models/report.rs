// Derived report shapes. JSON field names here are the external contract.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::ConnectivityState;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Closed span `[start, start + duration)` during which `state` held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub start: i64,
    pub state: ConnectivityState,
    pub duration: u64,
}

/// Per-state duration totals in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTotals {
    pub connected_ms: u64,
    pub disconnected_ms: u64,
}

impl StateTotals {
    pub fn get(&self, state: ConnectivityState) -> u64 {
        match state {
            ConnectivityState::Connected => self.connected_ms,
            ConnectivityState::Disconnected => self.disconnected_ms,
        }
    }

    pub fn add(&mut self, state: ConnectivityState, ms: u64) {
        match state {
            ConnectivityState::Connected => self.connected_ms += ms,
            ConnectivityState::Disconnected => self.disconnected_ms += ms,
        }
    }

    pub fn total(&self) -> u64 {
        self.connected_ms + self.disconnected_ms
    }
}

/// Output of the range-bounded interval reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalReduction {
    pub intervals: Vec<Interval>,
    pub totals: StateTotals,
    /// Samples whose timestamp fell outside the range and were clamped onto it.
    pub clamped_samples: usize,
}

/// One entry of the raw interval listing. The newest entry has `duration == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalEntry {
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: DateTime<Utc>,
    pub state: ConnectivityState,
    pub duration: u64,
}

/// `2024-06-01T00:00:00.000Z`: always three fractional digits.
fn serialize_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
}

/// Sum of event values on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    #[serde(rename = "date")]
    pub day: NaiveDate,
    #[serde(rename = "dataGenerated")]
    pub total: f64,
}

/// 24 hourly counts for one day. Serialized as the single-day report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyHistogram {
    #[serde(rename = "databyhour")]
    pub buckets: [u32; 24],
    #[serde(rename = "net")]
    pub total: u64,
    #[serde(rename = "avg")]
    pub average: f64,
    #[serde(rename = "busiesthour")]
    pub busiest_hour: u8,
}

/// Multi-day grouping of event values with busiest/quietest ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Rollup {
    pub total: f64,
    pub average: f64,
    pub busiest_days: Vec<DayBucket>,
    pub quietest_days: Vec<DayBucket>,
}

/// Milliseconds split into whole hours/minutes/seconds. Sub-second remainder is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationParts {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            hours: ms / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }
}

/// Multi-day overall report (rollup ranking + uptime/downtime).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallReport {
    pub success: bool,
    pub total_analytical_data: f64,
    pub average_analytical_data: f64,
    pub busiest_days: Vec<DayBucket>,
    pub quietest_days: Vec<DayBucket>,
    pub total_uptime: DurationParts,
    pub total_downtime: DurationParts,
}
