//! Handlers for report endpoints.
//!
//! Stock reports are addressed by catalog slug; custom reports take a
//! full `ReportSpec` in the request body. Both accept an optional
//! `from`/`to` window (query string for GET, JSON body for POST).

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use prodline_core::analytics::bucket::BucketSummary;
use prodline_core::analytics::catalog::{self, CatalogEntry};
use prodline_core::analytics::spec::ReportSpec;
use prodline_core::analytics::window::WindowParams;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /reports/custom`.
#[derive(Debug, Deserialize)]
pub struct CustomReportRequest {
    pub spec: ReportSpec,
    #[serde(flatten)]
    pub window: WindowParams,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find_entry(slug: &str) -> AppResult<CatalogEntry> {
    catalog::find(slug).ok_or_else(|| AppError::NotFound(format!("Unknown report '{slug}'")))
}

/// Whether the request declares a JSON body (`application/json` or a
/// `+json` suffix type).
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Window bounds from an optional JSON body. An empty body means the
/// default window; anything else must be well-formed JSON.
fn window_from_body(headers: &HeaderMap, body: &[u8]) -> AppResult<WindowParams> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(WindowParams::default());
    }
    if !has_json_content_type(headers) {
        return Err(AppError::BadRequest(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }
    let Json(window) = Json::<WindowParams>::from_bytes(body)
        .map_err(|e: JsonRejection| AppError::BadRequest(e.body_text()))?;
    Ok(window)
}

async fn run_report(
    state: &AppState,
    name: &str,
    spec: &ReportSpec,
    window: &WindowParams,
) -> AppResult<Json<Vec<BucketSummary>>> {
    tracing::debug!(
        report = name,
        from = ?window.from,
        to = ?window.to,
        "Report requested"
    );
    let buckets = state.assembler().run(spec, window).await?;
    Ok(Json(buckets))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /reports -- list the stock report catalog.
pub async fn list_reports() -> Json<DataResponse<Vec<CatalogEntry>>> {
    Json(DataResponse {
        data: catalog::catalog(),
    })
}

/// GET /reports/{slug}?from=&to=
pub async fn get_report(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    query: Result<Query<WindowParams>, QueryRejection>,
) -> AppResult<Json<Vec<BucketSummary>>> {
    let entry = find_entry(&slug)?;
    let Query(window) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    run_report(&state, entry.slug, &entry.spec, &window).await
}

/// POST /reports/{slug} with an optional `{ from, to }` body.
pub async fn post_report(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Vec<BucketSummary>>> {
    let entry = find_entry(&slug)?;
    let window = window_from_body(&headers, &body)?;
    run_report(&state, entry.slug, &entry.spec, &window).await
}

/// POST /reports/custom with `{ spec, from?, to? }`.
pub async fn run_custom_report(
    State(state): State<AppState>,
    body: Result<Json<CustomReportRequest>, JsonRejection>,
) -> AppResult<Json<Vec<BucketSummary>>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    run_report(&state, "custom", &request.spec, &request.window).await
}
