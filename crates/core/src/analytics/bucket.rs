//! Bucket identity and the per-bucket summary produced by every report.

use serde::{Deserialize, Serialize};

/// Key of the sentinel bucket for records whose join could not be resolved.
pub const UNKNOWN_KEY: &str = "unknown";

/// Label of the sentinel bucket.
pub const UNKNOWN_LABEL: &str = "Desconocido";

/// A bucket a record resolves to: a stable key plus a display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: String,
    pub label: String,
}

impl Bucket {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// The `"unknown"` / `"Desconocido"` sentinel.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_KEY, UNKNOWN_LABEL)
    }
}

/// Aggregated values for one bucket of a report.
///
/// Created fresh per report run; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    pub key: String,
    pub label: String,
    pub count: u64,
    pub primary_sum: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_sum: Option<f64>,
    pub percentage: f64,
}

impl BucketSummary {
    /// A zeroed summary. `with_secondary` starts `secondary_sum` at `0.0`
    /// instead of `None`.
    pub fn empty(bucket: Bucket, with_secondary: bool) -> Self {
        Self {
            key: bucket.key,
            label: bucket.label,
            count: 0,
            primary_sum: 0.0,
            secondary_sum: with_secondary.then_some(0.0),
            percentage: 0.0,
        }
    }
}
