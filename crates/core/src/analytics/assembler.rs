//! Report assembly: fetch, resolve, aggregate, normalize, rank.

use chrono::{FixedOffset, Offset, Utc};

use crate::analytics::aggregator::aggregate;
use crate::analytics::bucket::BucketSummary;
use crate::analytics::dimension::ResolveContext;
use crate::analytics::normalize::normalize;
use crate::analytics::rank::rank;
use crate::analytics::record::{FactRecord, RecordSource};
use crate::analytics::spec::ReportSpec;
use crate::analytics::store::RecordStore;
use crate::analytics::window::{resolve_window, Clock, WindowParams, DEFAULT_WINDOW_DAYS};
use crate::error::CoreError;
use crate::production::{ReferenceData, StoppageRecord};

/// Deployment knobs for report runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    /// Window length when the caller omits `from`.
    pub default_window_days: i64,
    /// Plant wall-clock offset for hour/day buckets and date-only bounds.
    pub utc_offset: FixedOffset,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_window_days: DEFAULT_WINDOW_DAYS,
            utc_offset: Utc.fix(),
        }
    }
}

/// Runs [`ReportSpec`]s against a [`RecordStore`].
///
/// Holds no state between runs; concurrent runs share nothing mutable.
pub struct ReportAssembler<'a> {
    store: &'a dyn RecordStore,
    clock: &'a dyn Clock,
    settings: ReportSettings,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(store: &'a dyn RecordStore, clock: &'a dyn Clock, settings: ReportSettings) -> Self {
        Self {
            store,
            clock,
            settings,
        }
    }

    /// Produce the ordered bucket list for `spec` over the window described
    /// by `params`.
    ///
    /// Fails with [`CoreError::Validation`] for an incoherent spec, an
    /// unparsable window, or a required stoppage category with no configured
    /// type; store failures propagate unchanged. Never returns a partial
    /// result.
    pub async fn run(
        &self,
        spec: &ReportSpec,
        params: &WindowParams,
    ) -> Result<Vec<BucketSummary>, CoreError> {
        spec.validate()?;
        let window = resolve_window(
            params,
            self.clock.now(),
            self.settings.default_window_days,
            self.settings.utc_offset,
        )?;

        tracing::debug!(
            source = ?spec.source,
            dimension = ?spec.dimension,
            from = %window.from,
            to = %window.to,
            "Running report"
        );

        let refs = ReferenceData::from(self.store.fetch_reference_data().await?);
        let ctx = ResolveContext {
            refs: &refs,
            offset: self.settings.utc_offset,
        };

        match spec.source {
            RecordSource::Productions => {
                let records = self.store.fetch_productions(&window).await?;
                Ok(finish(spec, &records, &ctx))
            }
            RecordSource::Stoppages => {
                let allowed = match spec.required_stoppage_category {
                    Some(category) => {
                        let ids = refs.stoppage_type_ids(category);
                        if ids.is_empty() {
                            return Err(CoreError::Validation(format!(
                                "no stoppage type with category '{}' is configured",
                                category.as_str()
                            )));
                        }
                        Some(ids)
                    }
                    None => None,
                };

                let mut records = self.store.fetch_stoppages(&window).await?;
                if let Some(allowed) = allowed {
                    records.retain(|s: &StoppageRecord| allowed.contains(&s.stoppage_type_id));
                }
                Ok(finish(spec, &records, &ctx))
            }
        }
    }
}

fn finish<R: FactRecord>(
    spec: &ReportSpec,
    records: &[R],
    ctx: &ResolveContext<'_>,
) -> Vec<BucketSummary> {
    let buckets = assemble(spec, records, ctx);
    tracing::debug!(records = records.len(), buckets = buckets.len(), "Report assembled");
    buckets
}

/// The synchronous part of a report run over already-fetched records.
///
/// Aggregates, normalizes over every bucket, then ranks (or keeps domain
/// order) and truncates.
pub fn assemble<R: FactRecord>(
    spec: &ReportSpec,
    records: &[R],
    ctx: &ResolveContext<'_>,
) -> Vec<BucketSummary> {
    let mut buckets: Vec<BucketSummary> = aggregate(records, spec.dimension, spec.selectors(), ctx)
        .into_values()
        .collect();
    normalize(&mut buckets, spec.normalize_against);

    if spec.preserve_domain_order {
        buckets
    } else {
        rank(buckets, spec.rank_key(), spec.direction, spec.rank_limit)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
