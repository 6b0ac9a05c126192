// Hourly histogram of event counts within one UTC calendar day.

use chrono::{DateTime, NaiveDate, Timelike};

use crate::models::{EventRecord, HourlyHistogram};

pub const HOURS_PER_DAY: usize = 24;
const MS_PER_DAY: i64 = 86_400_000;

/// `[00:00:00.000, 23:59:59.999]` of `day` in UTC, as epoch milliseconds.
pub fn day_bounds(day: NaiveDate) -> (i64, i64) {
    let start = day.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis();
    (start, start + MS_PER_DAY - 1)
}

/// Count records per hour of `day`. Records outside the day are ignored.
/// Returns `None` when no record falls within the day.
pub fn histogram(records: &[EventRecord], day: NaiveDate) -> Option<HourlyHistogram> {
    let (start, end) = day_bounds(day);
    let mut buckets = [0u32; HOURS_PER_DAY];
    let mut total: u64 = 0;

    for record in records {
        if record.timestamp < start || record.timestamp > end {
            continue;
        }
        let Some(at) = DateTime::from_timestamp_millis(record.timestamp) else {
            continue;
        };
        buckets[at.hour() as usize] += 1;
        total += 1;
    }

    if total == 0 {
        return None;
    }

    // First hour to reach the maximum wins; later equal counts do not displace it.
    let mut busiest_hour = 0usize;
    for (hour, &count) in buckets.iter().enumerate() {
        if count > buckets[busiest_hour] {
            busiest_hour = hour;
        }
    }

    Some(HourlyHistogram {
        buckets,
        total,
        average: total as f64 / HOURS_PER_DAY as f64,
        busiest_hour: busiest_hour as u8,
    })
}
