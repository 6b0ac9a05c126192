// Shared test helpers: timestamps and an in-memory TelemetrySource.

#![allow(dead_code)]

use chrono::NaiveDate;
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use telemetry_reports::models::{
    ConnectivityState, DataBounds, EventRecord, Interval, StateSample,
};
use telemetry_reports::reports::intervals::list_intervals;
use telemetry_reports::telemetry_repo::TelemetrySource;

pub const HOUR: i64 = 3_600_000;
pub const MINUTE: i64 = 60_000;
pub const DAY: i64 = 86_400_000;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Epoch millis of `hh:mm` UTC on the given date.
pub fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> i64 {
    date(y, m, d)
        .and_hms_opt(hh, mm, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

pub fn connected(ts: i64) -> StateSample {
    StateSample::new(ts, ConnectivityState::Connected)
}

pub fn disconnected(ts: i64) -> StateSample {
    StateSample::new(ts, ConnectivityState::Disconnected)
}

/// Samples as an infallible source stream.
pub fn sample_source(samples: Vec<StateSample>) -> BoxStream<'static, anyhow::Result<StateSample>> {
    stream::iter(samples.into_iter().map(Ok)).boxed()
}

/// Drive the raw listing to completion.
pub async fn listing(samples: Vec<StateSample>) -> Vec<Interval> {
    list_intervals(sample_source(samples))
        .try_collect()
        .await
        .unwrap()
}

#[derive(Default)]
pub struct MemorySource {
    pub events: Vec<EventRecord>,
    pub samples: Vec<StateSample>,
}

impl MemorySource {
    pub fn new(mut events: Vec<EventRecord>, mut samples: Vec<StateSample>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        samples.sort_by_key(|s| s.timestamp);
        Self { events, samples }
    }
}

fn bounds_of(timestamps: impl Iterator<Item = i64> + Clone) -> Option<DataBounds> {
    Some(DataBounds {
        min: timestamps.clone().min()?,
        max: timestamps.max()?,
    })
}

impl TelemetrySource for MemorySource {
    async fn event_bounds(&self) -> anyhow::Result<Option<DataBounds>> {
        Ok(bounds_of(self.events.iter().map(|e| e.timestamp)))
    }

    async fn sample_bounds(&self) -> anyhow::Result<Option<DataBounds>> {
        Ok(bounds_of(self.samples.iter().map(|s| s.timestamp)))
    }

    async fn events_in_range(&self, from_ts: i64, to_ts: i64) -> anyhow::Result<Vec<EventRecord>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.timestamp >= from_ts && e.timestamp <= to_ts)
            .copied()
            .collect())
    }

    async fn samples_in_range(&self, from_ts: i64, to_ts: i64) -> anyhow::Result<Vec<StateSample>> {
        Ok(self
            .samples
            .iter()
            .filter(|s| s.timestamp >= from_ts && s.timestamp <= to_ts)
            .copied()
            .collect())
    }

    fn sample_stream(&self) -> BoxStream<'_, anyhow::Result<StateSample>> {
        stream::iter(self.samples.iter().copied().map(Ok)).boxed()
    }
}

/// Source whose every read fails, for storage error paths.
pub struct BrokenSource;

impl TelemetrySource for BrokenSource {
    async fn event_bounds(&self) -> anyhow::Result<Option<DataBounds>> {
        anyhow::bail!("store unavailable")
    }

    async fn sample_bounds(&self) -> anyhow::Result<Option<DataBounds>> {
        anyhow::bail!("store unavailable")
    }

    async fn events_in_range(
        &self,
        _from_ts: i64,
        _to_ts: i64,
    ) -> anyhow::Result<Vec<EventRecord>> {
        anyhow::bail!("store unavailable")
    }

    async fn samples_in_range(
        &self,
        _from_ts: i64,
        _to_ts: i64,
    ) -> anyhow::Result<Vec<StateSample>> {
        anyhow::bail!("store unavailable")
    }

    fn sample_stream(&self) -> BoxStream<'_, anyhow::Result<StateSample>> {
        stream::iter([Err(anyhow::anyhow!("store unavailable"))]).boxed()
    }
}
