// HTTP routes

mod error;
mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::reports::ReportService;
use crate::telemetry_repo::TelemetrySource;

pub(crate) struct AppState<S> {
    pub(crate) reports: Arc<ReportService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            reports: self.reports.clone(),
        }
    }
}

pub fn app<S>(reports: Arc<ReportService<S>>) -> Router
where
    S: TelemetrySource + 'static,
{
    let state = AppState { reports };
    Router::new()
        .route("/", get(|| async { "telemetry-reports is running" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/analytics/{date}", get(http::analytics_handler::<S>)) // GET /api/analytics/2024-06-05
        .route("/api/overall-report/list", get(http::overall_report_handler::<S>)) // GET ?startDate=&endDate=
        .route("/api/uptime/list", get(http::uptime_list_handler::<S>)) // GET /api/uptime/list
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
