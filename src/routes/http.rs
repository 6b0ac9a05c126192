// GET handlers: version, single-day analytics, overall report, uptime listing

use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures_util::{StreamExt, TryStreamExt, stream};
use serde::Deserialize;
use tokio::sync::mpsc;

use super::AppState;
use crate::error::ReportError;
use crate::models::IntervalEntry;
use crate::reports::range::{self, ReportWindow};
use crate::telemetry_repo::TelemetrySource;

/// Package version (from Cargo.toml).
const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Package name (from Cargo.toml).
const NAME: &str = env!("CARGO_PKG_NAME");
/// Listing entries buffered between the cursor task and the response body.
const LISTING_CHANNEL_CAPACITY: usize = 64;

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/analytics/{date}: hourly histogram for one UTC day.
pub(super) async fn analytics_handler<S: TelemetrySource + 'static>(
    State(state): State<AppState<S>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, ReportError> {
    let day = range::parse_day(&date)?;
    let report = state.reports.histogram_report(day).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OverallReportQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// GET /api/overall-report/list?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD
pub(super) async fn overall_report_handler<S: TelemetrySource + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<OverallReportQuery>,
) -> Result<impl IntoResponse, ReportError> {
    let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
        return Err(ReportError::InvalidDate(String::new()));
    };
    let window = ReportWindow::parse(&start, &end)?;
    let report = state.reports.overall_report(window).await?;
    Ok(Json(report))
}

/// GET /api/uptime/list: every sample as an interval closed by its successor; newest is open.
///
/// The JSON array is written as the listing advances. A producer task owns the sample cursor
/// and hands entries over a bounded channel, so memory stays flat however long the history is.
pub(super) async fn uptime_list_handler<S: TelemetrySource + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Response, ReportError> {
    let (tx, mut rx) = mpsc::channel(LISTING_CHANNEL_CAPACITY);
    let reports = state.reports;
    tokio::spawn(async move {
        let mut entries = match reports.interval_listing().await {
            Ok(entries) => entries,
            Err(e) => {
                let _ = tx.send(Err(e)).await;
                return;
            }
        };
        while let Some(entry) = entries.next().await {
            if tx.send(entry).await.is_err() {
                tracing::debug!("uptime listing receiver dropped");
                break;
            }
        }
    });

    // Errors before the first entry still get a proper status code.
    let first = rx.recv().await.ok_or(ReportError::NoIntervals)??;
    let head = format!("[{}", entry_json(&first)?);

    let rest = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|entry| (entry, rx))
    })
    .map(|entry| entry.and_then(|entry| Ok(format!(",{}", entry_json(&entry)?))));
    let body = stream::iter([Ok::<_, ReportError>(head)])
        .chain(rest)
        .chain(stream::iter([Ok("]".to_string())]))
        .inspect_err(|e| tracing::error!(error = %e, "uptime listing aborted mid-stream"));

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(body),
    )
        .into_response())
}

fn entry_json(entry: &IntervalEntry) -> Result<String, ReportError> {
    serde_json::to_string(entry).map_err(|e| ReportError::Storage(e.into()))
}
