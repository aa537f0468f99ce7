//! The uniform view the engine takes of production and stoppage records.

use serde::{Deserialize, Serialize};

use crate::production::{CauseRef, ProductionRecord, StoppageRecord};
use crate::types::{DbId, Timestamp};

/// Which record stream a report reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordSource {
    Productions,
    Stoppages,
}

/// A numeric quantity that can be summed over records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Each record contributes `1`.
    Count,
    /// Stoppage minutes.
    Time,
    /// Produced boxes.
    Boxes,
    /// Planned boxes.
    PlannedBoxes,
}

impl Metric {
    /// Whether records of `source` carry this metric.
    pub fn applies_to(self, source: RecordSource) -> bool {
        match self {
            Metric::Count => true,
            Metric::Time => source == RecordSource::Stoppages,
            Metric::Boxes | Metric::PlannedBoxes => source == RecordSource::Productions,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Count => "count",
            Metric::Time => "time",
            Metric::Boxes => "boxes",
            Metric::PlannedBoxes => "plannedBoxes",
        }
    }
}

/// Accessors every aggregatable record provides.
///
/// Dimension resolvers and metric selectors only go through this trait, so
/// one aggregation path serves both record streams.
pub trait FactRecord {
    const SOURCE: RecordSource;

    /// The instant that places the record on the hour / day axes.
    fn occurred_at(&self) -> Timestamp;

    fn line_id(&self) -> DbId;

    fn product_id(&self) -> Option<DbId>;

    /// `None` for records that have no stoppage type.
    fn stoppage_type_id(&self) -> Option<DbId>;

    fn cause(&self) -> Option<&CauseRef>;

    /// Value of `metric` for this record; `0.0` when the metric does not
    /// apply to the record's source.
    fn measure(&self, metric: Metric) -> f64;
}

impl FactRecord for ProductionRecord {
    const SOURCE: RecordSource = RecordSource::Productions;

    fn occurred_at(&self) -> Timestamp {
        self.produced_at
    }

    fn line_id(&self) -> DbId {
        self.line_id
    }

    fn product_id(&self) -> Option<DbId> {
        Some(self.product_id)
    }

    fn stoppage_type_id(&self) -> Option<DbId> {
        None
    }

    fn cause(&self) -> Option<&CauseRef> {
        None
    }

    fn measure(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Count => 1.0,
            Metric::Boxes => f64::from(self.produced_boxes),
            Metric::PlannedBoxes => f64::from(self.planned_boxes),
            Metric::Time => 0.0,
        }
    }
}

impl FactRecord for StoppageRecord {
    const SOURCE: RecordSource = RecordSource::Stoppages;

    fn occurred_at(&self) -> Timestamp {
        self.started_at
    }

    fn line_id(&self) -> DbId {
        self.line_id
    }

    fn product_id(&self) -> Option<DbId> {
        self.product_id
    }

    fn stoppage_type_id(&self) -> Option<DbId> {
        Some(self.stoppage_type_id)
    }

    fn cause(&self) -> Option<&CauseRef> {
        self.cause.as_ref()
    }

    fn measure(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Count => 1.0,
            Metric::Time => f64::from(self.minutes),
            Metric::Boxes | Metric::PlannedBoxes => 0.0,
        }
    }
}
