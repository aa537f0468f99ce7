#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use http_body_util::BodyExt;
use prodline_core::analytics::store::{InMemoryRecordStore, RecordStore};
use prodline_core::analytics::window::FixedClock;
use prodline_core::production::{
    CauseRef, NamedEntity, Product, ProductionRecord, ProductionStatus, ReferenceCatalog,
    StoppageCategory, StoppageRecord, StoppageType,
};
use tower::ServiceExt;

use prodline_api::config::ServerConfig;
use prodline_api::router::build_app_router;
use prodline_api::state::AppState;

/// "Now" for every test app: Saturday 2024-06-15 12:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        report_default_window_days: 30,
        report_utc_offset: FixedOffset::east_opt(0).unwrap(),
    }
}

/// Build the full application router over `store`, with the clock pinned
/// to [`now`].
pub fn build_test_app(store: impl RecordStore + 'static) -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(store),
        clock: Arc::new(FixedClock(now())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 2024-06-{day} at {hour}:15 UTC. June 3rd 2024 is a Monday.
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 15, 0).unwrap()
}

pub fn reference() -> ReferenceCatalog {
    let named = |id, name: &str| NamedEntity {
        id,
        name: name.to_string(),
    };
    ReferenceCatalog {
        products: vec![
            Product {
                id: 1,
                name: "Cola 600".into(),
                flavor: "Cola".into(),
                model: "PET".into(),
                size_liters: 0.6,
                units_per_box: 24,
            },
            Product {
                id: 2,
                name: "Naranja 2L".into(),
                flavor: "Naranja".into(),
                model: "PET".into(),
                size_liters: 2.0,
                units_per_box: 8,
            },
        ],
        lines: vec![named(1, "Línea 1"), named(2, "Línea 2")],
        stoppage_types: vec![
            StoppageType {
                id: 1,
                name: "Mantenimiento".into(),
                category: StoppageCategory::Maintenance,
            },
            StoppageType {
                id: 2,
                name: "Calidad".into(),
                category: StoppageCategory::Quality,
            },
        ],
        quality_deviations: vec![named(1, "Brix bajo"), named(2, "Tapa floja")],
        raw_materials: vec![named(1, "Preforma")],
        subsystems: vec![named(1, "Llenadora")],
        subsubsystems: vec![],
    }
}

pub fn production(id: i64, line_id: i64, produced: u32, planned: u32, at: DateTime<Utc>) -> ProductionRecord {
    ProductionRecord {
        id,
        product_id: 1,
        line_id,
        produced_boxes: produced,
        planned_boxes: planned,
        status: ProductionStatus::Completed,
        produced_at: at,
    }
}

pub fn stoppage(
    id: i64,
    type_id: i64,
    minutes: u32,
    cause: Option<CauseRef>,
    at: DateTime<Utc>,
) -> StoppageRecord {
    StoppageRecord {
        id,
        production_id: 1,
        line_id: 1,
        product_id: Some(1),
        stoppage_type_id: type_id,
        cause,
        minutes,
        started_at: at,
    }
}

/// A store with a small week of data inside the default window.
pub fn seeded_store() -> InMemoryRecordStore {
    InMemoryRecordStore::new(reference())
        .with_productions([
            production(1, 1, 50, 100, at(3, 10)),
            production(2, 1, 20, 20, at(3, 10)),
            production(3, 2, 90, 100, at(4, 14)),
        ])
        .with_stoppages([
            stoppage(1, 2, 30, Some(CauseRef::QualityDeviation { id: 1 }), at(3, 8)),
            stoppage(2, 2, 10, Some(CauseRef::QualityDeviation { id: 2 }), at(3, 9)),
            stoppage(3, 1, 60, Some(CauseRef::RawMaterial { id: 1 }), at(9, 9)),
        ])
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw body, optionally with a `content-type` header.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
