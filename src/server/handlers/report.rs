//! Report generation handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::RecapError;
use crate::report;
use crate::wire::{ReportResponse, SubmissionPayload};

use super::super::state::AppState;

/// Handle POST /api/report - parse the pasted dumps and rasterize a recap.
///
/// Malformed or empty submissions map to 400, everything else that fails
/// maps to 500. Parsing and rasterization are CPU-bound and run on the
/// blocking pool.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmissionPayload>,
) -> Response {
    let year = state.config.report_year;
    let store = state.reports.clone();

    let result = tokio::task::spawn_blocking(move || {
        let image = report::from_payload(&payload, year)?;
        store.save(&image)
    })
    .await;

    match result {
        Ok(Ok(guid)) => {
            info!(guid = %guid, "report generated");
            Json(ReportResponse { guid }).into_response()
        }
        Ok(Err(e @ RecapError::OrderDump(_))) => {
            warn!("rejected submission: {}", e);
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Ok(Err(e)) => {
            error!("report generation failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
        Err(e) => {
            error!("report task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Task error")
        }
    }
}

/// Generate error response JSON.
fn error_response(status: StatusCode, error_msg: &str) -> Response {
    (
        status,
        Json(serde_json::json!({"success": false, "error": error_msg})),
    )
        .into_response()
}
