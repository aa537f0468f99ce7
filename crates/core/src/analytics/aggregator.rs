//! Grouping records into bucket summaries.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::analytics::bucket::BucketSummary;
use crate::analytics::dimension::{Dimension, Resolution, ResolveContext};
use crate::analytics::record::{FactRecord, Metric};

/// Bucket summaries keyed by bucket key, in discovery order.
///
/// Full-domain dimensions start with every domain bucket in domain order;
/// other dimensions gain buckets as records first resolve to them.
pub type BucketMap = IndexMap<String, BucketSummary>;

/// Which record quantities a report accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSelectors {
    pub primary: Metric,
    pub secondary: Option<Metric>,
}

/// Group `records` along `dimension`, summing the selected metrics.
///
/// Excluded records are skipped. Accumulation is commutative: any
/// permutation of `records` yields the same counts and sums per bucket.
pub fn aggregate<R: FactRecord>(
    records: &[R],
    dimension: Dimension,
    selectors: MetricSelectors,
    ctx: &ResolveContext<'_>,
) -> BucketMap {
    let with_secondary = selectors.secondary.is_some();
    let mut buckets: BucketMap = dimension
        .domain()
        .unwrap_or_default()
        .into_iter()
        .map(|b| (b.key.clone(), BucketSummary::empty(b, with_secondary)))
        .collect();

    for record in records {
        let bucket = match dimension.resolve(record, ctx) {
            Resolution::Bucket(bucket) => bucket,
            Resolution::Excluded => continue,
        };

        let summary = match buckets.entry(bucket.key.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(BucketSummary::empty(bucket, with_secondary)),
        };

        summary.count += 1;
        summary.primary_sum += record.measure(selectors.primary);
        if let Some(secondary) = selectors.secondary {
            *summary.secondary_sum.get_or_insert(0.0) += record.measure(secondary);
        }
    }

    buckets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::analytics::bucket::UNKNOWN_KEY;
    use crate::analytics::test_helpers::{at, catalog, production, stoppage};
    use crate::production::{ReferenceData, StoppageRecord};

    fn utc(refs: &ReferenceData) -> ResolveContext<'_> {
        ResolveContext {
            refs,
            offset: FixedOffset::east_opt(0).unwrap(),
        }
    }

    const BOXES_VS_PLAN: MetricSelectors = MetricSelectors {
        primary: Metric::Boxes,
        secondary: Some(Metric::PlannedBoxes),
    };

    const MINUTES: MetricSelectors = MetricSelectors {
        primary: Metric::Time,
        secondary: None,
    };

    #[test]
    fn hour_dimension_is_pre_seeded_on_empty_input() {
        let refs = ReferenceData::default();
        let buckets = aggregate::<StoppageRecord>(&[], Dimension::HourOfDay, MINUTES, &utc(&refs));

        assert_eq!(buckets.len(), 24);
        for (i, (key, summary)) in buckets.iter().enumerate() {
            assert_eq!(key, &i.to_string());
            assert_eq!(summary.count, 0);
            assert_eq!(summary.primary_sum, 0.0);
        }
    }

    #[test]
    fn day_dimension_is_pre_seeded_monday_first() {
        let refs = ReferenceData::default();
        let buckets = aggregate::<StoppageRecord>(&[], Dimension::DayOfWeek, MINUTES, &utc(&refs));
        let keys: Vec<&str> = buckets.keys().map(String::as_str).collect();
        assert_eq!(keys, ["1", "2", "3", "4", "5", "6", "0"]);
    }

    #[test]
    fn efficiency_by_hour_scenario() {
        let refs = ReferenceData::from(catalog());
        let records = vec![
            production(1, 1, 100, 100),
            production(2, 1, 50, 100),
            production(3, 1, 25, 100),
        ];

        let buckets = aggregate(&records, Dimension::HourOfDay, BOXES_VS_PLAN, &utc(&refs));

        assert_eq!(buckets.len(), 24);
        let ten = &buckets["10"];
        assert_eq!(ten.count, 3);
        assert_eq!(ten.primary_sum, 175.0);
        assert_eq!(ten.secondary_sum, Some(300.0));
        assert_eq!(
            buckets.values().filter(|b| b.key != "10").map(|b| b.count).sum::<u64>(),
            0
        );
    }

    #[test]
    fn non_domain_buckets_appear_in_discovery_order() {
        let refs = ReferenceData::from(catalog());
        let records = vec![
            production(1, 2, 10, 10),
            production(2, 1, 10, 10),
            production(3, 2, 10, 10),
        ];

        let buckets = aggregate(&records, Dimension::ProductFlavor, BOXES_VS_PLAN, &utc(&refs));
        let keys: Vec<&str> = buckets.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Naranja", "Cola"]);
        assert_eq!(buckets["Naranja"].count, 2);
    }

    #[test]
    fn missing_product_is_bucketed_as_unknown() {
        let refs = ReferenceData::from(catalog());
        let records = vec![production(1, 1, 10, 10), production(2, 404, 7, 10)];

        let buckets = aggregate(&records, Dimension::ProductFlavor, BOXES_VS_PLAN, &utc(&refs));
        assert_eq!(buckets[UNKNOWN_KEY].count, 1);
        assert_eq!(buckets[UNKNOWN_KEY].primary_sum, 7.0);
    }

    #[test]
    fn excluded_records_do_not_create_buckets() {
        let refs = ReferenceData::from(catalog());
        let records = vec![stoppage(1, 10, None), stoppage(2, 20, None)];

        let buckets = aggregate(&records, Dimension::RawMaterial, MINUTES, &utc(&refs));
        assert!(buckets.is_empty());
    }

    #[test]
    fn permutations_yield_identical_sums() {
        let refs = ReferenceData::from(catalog());
        let mut records = Vec::new();
        for (i, (day, hour, minutes)) in [(3, 8, 5), (4, 8, 7), (3, 9, 11), (9, 23, 2), (5, 8, 13)]
            .into_iter()
            .enumerate()
        {
            let mut r = stoppage(i as i64 + 1, minutes, None);
            r.started_at = at(day, hour);
            r.line_id = (i as i64 % 2) + 1;
            records.push(r);
        }

        for dimension in [Dimension::HourOfDay, Dimension::DayOfWeek, Dimension::Line] {
            let forward = aggregate(&records, dimension, MINUTES, &utc(&refs));
            let mut reversed = records.clone();
            reversed.reverse();
            let backward = aggregate(&reversed, dimension, MINUTES, &utc(&refs));
            let mut rotated = records.clone();
            rotated.rotate_left(2);
            let shifted = aggregate(&rotated, dimension, MINUTES, &utc(&refs));

            for other in [&backward, &shifted] {
                assert_eq!(forward.len(), other.len());
                for (key, summary) in &forward {
                    assert_eq!(summary.count, other[key].count);
                    assert_eq!(summary.primary_sum, other[key].primary_sum);
                }
            }
        }
    }
}
