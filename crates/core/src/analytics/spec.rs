//! Declarative report configuration.

use serde::{Deserialize, Serialize};

use crate::analytics::aggregator::MetricSelectors;
use crate::analytics::dimension::Dimension;
use crate::analytics::normalize::Normalization;
use crate::analytics::rank::{Direction, RankKey};
use crate::analytics::record::{Metric, RecordSource};
use crate::error::CoreError;
use crate::production::StoppageCategory;

/// Everything the assembler needs to produce one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSpec {
    pub source: RecordSource,
    pub dimension: Dimension,
    pub metric: Metric,
    #[serde(default)]
    pub secondary_metric: Option<Metric>,
    #[serde(default)]
    pub normalize_against: Normalization,
    /// Defaults to the headline metric (see [`ReportSpec::rank_key`]).
    #[serde(default)]
    pub rank_by: Option<RankKey>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub rank_limit: Option<usize>,
    /// Keep the dimension's domain order instead of ranking.
    #[serde(default)]
    pub preserve_domain_order: bool,
    /// Restrict stoppages to this category; the report fails when no
    /// stoppage type of the category exists.
    #[serde(default)]
    pub required_stoppage_category: Option<StoppageCategory>,
}

impl ReportSpec {
    /// Boxes produced against plan, compliance percentage per bucket.
    pub fn production(dimension: Dimension) -> Self {
        Self {
            source: RecordSource::Productions,
            dimension,
            metric: Metric::Boxes,
            secondary_metric: Some(Metric::PlannedBoxes),
            normalize_against: Normalization::Plan,
            rank_by: None,
            direction: Direction::Descending,
            rank_limit: None,
            preserve_domain_order: false,
            required_stoppage_category: None,
        }
    }

    /// Stoppage `metric` per bucket as a share of the window total.
    pub fn stoppages(dimension: Dimension, metric: Metric) -> Self {
        Self {
            source: RecordSource::Stoppages,
            dimension,
            metric,
            secondary_metric: None,
            normalize_against: Normalization::GrandTotal,
            rank_by: None,
            direction: Direction::Descending,
            rank_limit: None,
            preserve_domain_order: false,
            required_stoppage_category: None,
        }
    }

    pub fn in_domain_order(mut self) -> Self {
        self.preserve_domain_order = true;
        self
    }

    pub fn ranked_by(mut self, key: RankKey) -> Self {
        self.rank_by = Some(key);
        self
    }

    pub fn top(mut self, limit: usize) -> Self {
        self.rank_limit = Some(limit);
        self
    }

    pub fn requiring(mut self, category: StoppageCategory) -> Self {
        self.required_stoppage_category = Some(category);
        self
    }

    pub fn selectors(&self) -> MetricSelectors {
        MetricSelectors {
            primary: self.metric,
            secondary: self.secondary_metric,
        }
    }

    /// The key used for ranking: `rank_by`, else the headline metric
    /// (`count` for count reports, the primary sum otherwise).
    pub fn rank_key(&self) -> RankKey {
        self.rank_by.unwrap_or(match self.metric {
            Metric::Count => RankKey::Count,
            _ => RankKey::PrimarySum,
        })
    }

    /// Reject combinations that cannot produce a meaningful report.
    pub fn validate(&self) -> Result<(), CoreError> {
        let source = self.source;
        let invalid = |msg: String| Err(CoreError::Validation(msg));

        if !self.metric.applies_to(source) {
            return invalid(format!(
                "metric '{}' is not available for {source:?}",
                self.metric.as_str()
            ));
        }
        if let Some(secondary) = self.secondary_metric {
            if !secondary.applies_to(source) {
                return invalid(format!(
                    "secondary metric '{}' is not available for {source:?}",
                    secondary.as_str()
                ));
            }
        }
        if !self.dimension.applies_to(source) {
            return invalid(format!(
                "dimension {:?} is not available for {source:?}",
                self.dimension
            ));
        }
        if self.normalize_against == Normalization::Plan && self.secondary_metric.is_none() {
            return invalid("plan normalization requires a secondary metric".to_string());
        }
        if self.rank_limit == Some(0) {
            return invalid("rankLimit must be at least 1".to_string());
        }
        if self.preserve_domain_order {
            if !self.dimension.is_full_domain() {
                return invalid(format!(
                    "preserveDomainOrder requires hourOfDay or dayOfWeek, got {:?}",
                    self.dimension
                ));
            }
            if self.rank_limit.is_some() {
                return invalid("rankLimit cannot be combined with preserveDomainOrder".to_string());
            }
        }
        if self.required_stoppage_category.is_some() && source != RecordSource::Stoppages {
            return invalid("requiredStoppageCategory only applies to stoppage reports".to_string());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
