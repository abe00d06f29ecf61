//! Property-based tests for rating values and rating aggregation
//!
//! This module uses the proptest crate to verify the invariants of the rating
//! aggregate: the mean stays inside the star scale, every rating lands in at
//! most one distribution bucket, and aggregation is a pure function of its
//! input.

use proptest::prelude::*;

use peershare::model::Rating;
use peershare::stats::rating_stats;

// PROPERTY TEST STRATEGIES

/// Strategy to generate valid ratings across the whole scale, in tenths.
fn rating_strategy() -> impl Strategy<Value = Rating> {
    (0u8..=50).prop_map(|tenths| Rating::from_tenths(tenths).unwrap())
}

fn ratings_strategy() -> impl Strategy<Value = Vec<Rating>> {
    prop::collection::vec(rating_strategy(), 0..64)
}

// PROPERTY TESTS
proptest! {
    /// Property: the average always stays within the star scale and carries at
    /// most one decimal place.
    #[test]
    fn prop_average_stays_on_scale(ratings in ratings_strategy()) {
        let stats = rating_stats(&ratings);

        prop_assert!((0.0..=5.0).contains(&stats.average));
        let scaled = stats.average * 10.0;
        prop_assert!(
            (scaled - scaled.round()).abs() < 1e-9,
            "average has more than one decimal: {}",
            stats.average
        );
    }

    /// Property: total counts every rating; the buckets count exactly the
    /// ratings of at least half a star, since lower ones round to zero stars.
    #[test]
    fn prop_buckets_cover_ratings_of_half_a_star_or_more(ratings in ratings_strategy()) {
        let stats = rating_stats(&ratings);

        prop_assert_eq!(stats.total, ratings.len() as u64);

        let bucketed: u64 = stats.distribution.iter().sum();
        let expected = ratings.iter().filter(|r| r.tenths() >= 5).count() as u64;
        prop_assert_eq!(bucketed, expected);
    }

    /// Property: a single rating lands in the bucket whose star value it
    /// rounds to, covering [k - 0.5, k + 0.5) stars.
    #[test]
    fn prop_single_rating_lands_in_its_rounding_bucket(rating in rating_strategy()) {
        let stats = rating_stats(&[rating]);

        let bucket = (u64::from(rating.tenths()) + 5) / 10;
        if (1..=5).contains(&bucket) {
            prop_assert_eq!(stats.distribution[bucket as usize - 1], 1);
        } else {
            prop_assert_eq!(stats.distribution.iter().sum::<u64>(), 0);
        }
    }

    /// Property: aggregation is deterministic and order-independent.
    #[test]
    fn prop_aggregation_ignores_order(ratings in ratings_strategy()) {
        let forward = rating_stats(&ratings);

        let mut reversed = ratings.clone();
        reversed.reverse();
        let backward = rating_stats(&reversed);

        prop_assert_eq!(forward, backward);
    }

    /// Property: every in-range star value converts to tenths and back without
    /// drift.
    #[test]
    fn prop_star_conversion_round_trips(tenths in 0u8..=50) {
        let rating = Rating::from_tenths(tenths).unwrap();
        let reconstructed = Rating::from_stars(rating.stars()).unwrap();

        prop_assert_eq!(reconstructed.tenths(), tenths);
    }

    /// Property: out-of-range inputs are always rejected.
    #[test]
    fn prop_out_of_range_inputs_are_rejected(tenths in 51u8..=255) {
        prop_assert!(Rating::from_tenths(tenths).is_err());
        prop_assert!(Rating::from_stars(f64::from(tenths) / 10.0).is_err());
    }
}
