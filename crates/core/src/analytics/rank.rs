//! Ordering and top-N truncation of bucket summaries.

use serde::{Deserialize, Serialize};

use crate::analytics::bucket::BucketSummary;

/// The bucket value a ranking compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankKey {
    Count,
    PrimarySum,
    Percentage,
}

impl RankKey {
    fn value(self, bucket: &BucketSummary) -> f64 {
        match self {
            RankKey::Count => bucket.count as f64,
            RankKey::PrimarySum => bucket.primary_sum,
            RankKey::Percentage => bucket.percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Descending,
    Ascending,
}

/// Sort `buckets` by `key` and keep at most `limit` of them.
///
/// The sort is stable: buckets with equal values keep their incoming
/// (discovery) order. No secondary key is applied.
pub fn rank(
    mut buckets: Vec<BucketSummary>,
    key: RankKey,
    direction: Direction,
    limit: Option<usize>,
) -> Vec<BucketSummary> {
    buckets.sort_by(|a, b| {
        let ordering = key.value(a).total_cmp(&key.value(b));
        match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
    if let Some(limit) = limit {
        buckets.truncate(limit);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::bucket::Bucket;

    fn summary(key: &str, count: u64, primary: f64) -> BucketSummary {
        let mut s = BucketSummary::empty(Bucket::new(key, key), false);
        s.count = count;
        s.primary_sum = primary;
        s
    }

    fn keys(buckets: &[BucketSummary]) -> Vec<&str> {
        buckets.iter().map(|b| b.key.as_str()).collect()
    }

    #[test]
    fn ranks_descending_by_default() {
        let ranked = rank(
            vec![summary("a", 1, 5.0), summary("b", 1, 20.0), summary("c", 1, 10.0)],
            RankKey::PrimarySum,
            Direction::default(),
            None,
        );
        assert_eq!(keys(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let ranked = rank(
            vec![
                summary("first", 1, 30.0),
                summary("big", 1, 90.0),
                summary("second", 1, 30.0),
                summary("third", 1, 30.0),
            ],
            RankKey::PrimarySum,
            Direction::Descending,
            None,
        );
        assert_eq!(keys(&ranked), ["big", "first", "second", "third"]);

        let ascending = rank(
            vec![summary("x", 2, 0.0), summary("y", 1, 0.0), summary("z", 2, 0.0)],
            RankKey::Count,
            Direction::Ascending,
            None,
        );
        assert_eq!(keys(&ascending), ["y", "x", "z"]);
    }

    #[test]
    fn truncates_to_limit() {
        let buckets: Vec<_> = (1..=15).map(|m| summary(&m.to_string(), 1, m as f64)).collect();
        let ranked = rank(buckets, RankKey::PrimarySum, Direction::Descending, Some(10));

        assert_eq!(ranked.len(), 10);
        let minutes: Vec<f64> = ranked.iter().map(|b| b.primary_sum).collect();
        assert_eq!(minutes, [15.0, 14.0, 13.0, 12.0, 11.0, 10.0, 9.0, 8.0, 7.0, 6.0]);
    }

    #[test]
    fn limit_larger_than_input_keeps_everything() {
        let ranked = rank(vec![summary("a", 3, 0.0)], RankKey::Count, Direction::Descending, Some(10));
        assert_eq!(ranked.len(), 1);
    }
}
