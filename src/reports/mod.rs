// Report orchestration: composes histogram, rollup and interval reduction into the
// externally visible report shapes. The pure builders take already-fetched records;
// ReportService pulls a consistent snapshot from a TelemetrySource first.

pub mod histogram;
pub mod intervals;
pub mod range;
pub mod rollup;

use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use futures_util::stream::{BoxStream, Stream, StreamExt};
use tracing::instrument;

use crate::error::ReportError;
use crate::models::{
    ConnectivityState, DataBounds, DurationParts, EventRecord, HourlyHistogram, IntervalEntry,
    OverallReport, StateSample,
};
use crate::telemetry_repo::TelemetrySource;
use range::ReportWindow;

/// Raw listing entries in sample order.
pub type EntryStream<'a> = BoxStream<'a, Result<IntervalEntry, ReportError>>;

/// Engine knobs that change report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    /// State attributed to a range that has no samples at all.
    pub default_state: ConnectivityState,
    /// Days listed in each of busiestDays/quietestDays.
    pub ranking_size: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_state: ConnectivityState::Disconnected,
            ranking_size: rollup::DEFAULT_RANKING_SIZE,
        }
    }
}

/// Single-day report. No records in the day is `NoDataForDate`, never a zero-filled histogram.
pub fn build_histogram_report(
    records: &[EventRecord],
    day: NaiveDate,
) -> Result<HourlyHistogram, ReportError> {
    histogram::histogram(records, day).ok_or(ReportError::NoDataForDate(day))
}

/// Multi-day report. Validation runs first; on failure nothing is aggregated.
pub fn build_overall_report(
    events: &[EventRecord],
    samples: &[StateSample],
    window: ReportWindow,
    event_bounds: Option<DataBounds>,
    settings: ReportSettings,
) -> Result<OverallReport, ReportError> {
    range::validate(window.start, window.end, event_bounds)?;
    Ok(compose_overall(events, samples, window, settings))
}

fn compose_overall(
    events: &[EventRecord],
    samples: &[StateSample],
    window: ReportWindow,
    settings: ReportSettings,
) -> OverallReport {
    let rollup = rollup::rollup(events, window.start, window.end, settings.ranking_size);
    let reduction =
        intervals::reduce(samples, window.start, window.end, settings.default_state);
    if reduction.clamped_samples > 0 {
        tracing::warn!(
            clamped_samples = reduction.clamped_samples,
            "overall report: state samples outside the requested window"
        );
    }

    OverallReport {
        success: true,
        total_analytical_data: rollup.total,
        average_analytical_data: rollup.average,
        busiest_days: rollup.busiest_days,
        quietest_days: rollup.quietest_days,
        total_uptime: DurationParts::from_millis(
            reduction.totals.get(ConnectivityState::Connected),
        ),
        total_downtime: DurationParts::from_millis(
            reduction.totals.get(ConnectivityState::Disconnected),
        ),
    }
}

/// Raw listing entries for `samples` (expected oldest first), produced one at a time.
///
/// An instant chrono cannot represent is a storage error, never a silently dropped entry.
pub fn interval_entries<'a, St>(samples: St) -> EntryStream<'a>
where
    St: Stream<Item = anyhow::Result<StateSample>> + Send + 'a,
{
    intervals::list_intervals(samples)
        .map(|item| -> Result<IntervalEntry, ReportError> {
            let interval = item?;
            let timestamp = DateTime::from_timestamp_millis(interval.start).ok_or_else(|| {
                anyhow::anyhow!("sample timestamp {} is not representable", interval.start)
            })?;
            Ok(IntervalEntry {
                timestamp,
                state: interval.state,
                duration: interval.duration,
            })
        })
        .boxed()
}

/// Builds reports from an injected telemetry source.
pub struct ReportService<S> {
    source: Arc<S>,
    settings: ReportSettings,
}

impl<S: TelemetrySource> ReportService<S> {
    pub fn new(source: Arc<S>, settings: ReportSettings) -> Self {
        Self { source, settings }
    }

    #[instrument(skip(self), fields(operation = "histogram_report"))]
    pub async fn histogram_report(&self, day: NaiveDate) -> Result<HourlyHistogram, ReportError> {
        let (start, end) = histogram::day_bounds(day);
        let records = self.source.events_in_range(start, end).await?;
        build_histogram_report(&records, day)
    }

    #[instrument(skip(self), fields(operation = "overall_report", start = window.start, end = window.end))]
    pub async fn overall_report(&self, window: ReportWindow) -> Result<OverallReport, ReportError> {
        let (bounds, sample_bounds) =
            tokio::try_join!(self.source.event_bounds(), self.source.sample_bounds())?;
        range::validate(window.start, window.end, bounds)?;
        match sample_bounds {
            None => tracing::info!(
                default_state = self.settings.default_state.as_label(),
                "no connectivity samples stored; window attributed to default state"
            ),
            Some(b) if b.min > window.start => tracing::debug!(
                first_sample = b.min,
                "window starts before the first connectivity sample"
            ),
            Some(_) => {}
        }

        let (events, samples) = tokio::try_join!(
            self.source.events_in_range(window.start, window.end),
            self.source.samples_in_range(window.start, window.end),
        )?;
        tracing::debug!(
            events = events.len(),
            samples = samples.len(),
            "overall report snapshot fetched"
        );
        Ok(compose_overall(&events, &samples, window, self.settings))
    }

    /// Raw listing over every stored sample. `NoIntervals` when the store holds none;
    /// the first entry is already pulled when this returns.
    #[instrument(skip(self), fields(operation = "interval_listing"))]
    pub async fn interval_listing(&self) -> Result<EntryStream<'_>, ReportError> {
        let mut entries = interval_entries(self.source.sample_stream()).peekable();
        if Pin::new(&mut entries).peek().await.is_none() {
            return Err(ReportError::NoIntervals);
        }
        Ok(entries.boxed())
    }
}
