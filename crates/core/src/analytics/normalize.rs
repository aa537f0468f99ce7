//! Percentage computation for bucket summaries.
//!
//! Every division goes through [`percentage_of`], which returns `0.0` when the
//! denominator is zero, so no bucket ever carries `NaN`.

use serde::{Deserialize, Serialize};

use crate::analytics::bucket::BucketSummary;

/// What a bucket's `percentage` is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Normalization {
    /// Share of the primary sum across all buckets of the current result.
    #[default]
    GrandTotal,
    /// Compliance: the bucket's primary sum over its own secondary sum.
    Plan,
    /// Leave `percentage` at zero.
    None,
}

/// `part / total * 100`, or `0.0` when `total` is not positive.
pub fn percentage_of(part: f64, total: f64) -> f64 {
    if total > 0.0 && total.is_finite() {
        part / total * 100.0
    } else {
        0.0
    }
}

/// Fill in `percentage` for every bucket.
///
/// The grand total is recomputed from `buckets` on each call, so
/// percentages are relative to the reported window and must be computed
/// before any top-N truncation.
pub fn normalize(buckets: &mut [BucketSummary], against: Normalization) {
    match against {
        Normalization::GrandTotal => {
            let total: f64 = buckets.iter().map(|b| b.primary_sum).sum();
            for bucket in buckets.iter_mut() {
                bucket.percentage = percentage_of(bucket.primary_sum, total);
            }
        }
        Normalization::Plan => {
            for bucket in buckets.iter_mut() {
                bucket.percentage =
                    percentage_of(bucket.primary_sum, bucket.secondary_sum.unwrap_or(0.0));
            }
        }
        Normalization::None => {
            for bucket in buckets.iter_mut() {
                bucket.percentage = 0.0;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
