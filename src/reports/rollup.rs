// Per-day rollup of event values across a date range, with busiest/quietest ranking.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use crate::models::{DayBucket, EventRecord, Rollup};

/// Number of days reported in each of the busiest/quietest lists.
pub const DEFAULT_RANKING_SIZE: usize = 3;

/// Group records in `[range_start, range_end]` by UTC day, summing `value`.
///
/// `average` is per record, not per day. Ties in a day's total are broken by ascending date.
/// With fewer than `2 * ranking_size` days the busiest and quietest lists overlap.
pub fn rollup(
    records: &[EventRecord],
    range_start: i64,
    range_end: i64,
    ranking_size: usize,
) -> Rollup {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut record_count: usize = 0;

    for record in records {
        if record.timestamp < range_start || record.timestamp > range_end {
            continue;
        }
        let Some(at) = DateTime::from_timestamp_millis(record.timestamp) else {
            continue;
        };
        *by_day.entry(at.date_naive()).or_insert(0.0) += record.value;
        record_count += 1;
    }

    let days: Vec<DayBucket> = by_day
        .into_iter()
        .map(|(day, total)| DayBucket { day, total })
        .collect();
    let total: f64 = days.iter().map(|d| d.total).sum();
    let average = if record_count == 0 {
        0.0
    } else {
        total / record_count as f64
    };

    let mut busiest = days.clone();
    busiest.sort_by(|a, b| b.total.total_cmp(&a.total).then(a.day.cmp(&b.day)));
    busiest.truncate(ranking_size);

    let mut quietest = days;
    quietest.sort_by(|a, b| a.total.total_cmp(&b.total).then(a.day.cmp(&b.day)));
    quietest.truncate(ranking_size);

    Rollup {
        total,
        average,
        busiest_days: busiest,
        quietest_days: quietest,
    }
}
