//! Property tests for hit-rate arithmetic.

use cacheperf::domain::models::{hit_rate, CachedModeSummary, ModeAggregate};
use proptest::prelude::*;

proptest! {
    /// Hit rate stays within [0, 100] for any counts.
    #[test]
    fn prop_hit_rate_is_bounded(hits in 0u64..1_000_000, total in 0u64..1_000_000) {
        let rate = hit_rate(hits, total);
        prop_assert!((0.0..=100.0).contains(&rate));
    }

    /// Zero requests never divides by zero.
    #[test]
    fn prop_zero_total_is_zero_rate(hits in 0u64..1_000) {
        prop_assert_eq!(hit_rate(hits, 0), 0.0);
    }

    /// All hits is exactly 100%.
    #[test]
    fn prop_all_hits_is_full_rate(total in 1u64..1_000_000) {
        prop_assert_eq!(hit_rate(total, total), 100.0);
    }

    /// Summaries carry the aggregate counts through unchanged.
    #[test]
    fn prop_summary_preserves_counts(hits in 0u64..500, extra in 0u64..500, avg in 0.0f64..1000.0) {
        let total = hits + extra;
        let summary = CachedModeSummary::from_aggregate(ModeAggregate {
            avg_response_time_ms: (total > 0).then_some(avg),
            total,
            hits,
        });
        prop_assert_eq!(summary.total_requests, total);
        prop_assert_eq!(summary.cache_hits, hits);
        prop_assert!(summary.cache_hit_rate <= 100.0);
    }
}
