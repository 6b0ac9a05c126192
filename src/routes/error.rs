// ReportError -> HTTP response. Bad requests are 400, missing data 404, storage failures 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::ReportError;

impl ReportError {
    fn status(&self) -> StatusCode {
        if self.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else if self.is_no_data() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            ReportError::Storage(e) => {
                tracing::error!(error = %e, "report request failed");
                (status, "Internal Server Error").into_response()
            }
            ReportError::NoIntervals => {
                (status, Json(json!({ "message": message }))).into_response()
            }
            _ => (
                status,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
        }
    }
}
