//! Route definitions for production and stoppage reports.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Report routes mounted at `/reports`.
///
/// ```text
/// GET  /                -> list_reports
/// POST /custom          -> run_custom_report
/// GET  /{slug}          -> get_report
/// POST /{slug}          -> post_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list_reports))
        .route("/custom", post(reports::run_custom_report))
        .route("/{slug}", get(reports::get_report).post(reports::post_report))
}
