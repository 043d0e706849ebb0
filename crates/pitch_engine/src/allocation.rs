//! Allocation normaliser.
//!
//! Editing one bucket rebalances the other six so the allocation keeps
//! summing to 100:
//!
//! 1. The edited value is clamped to `[0, 100]` and rounded to
//!    [`ALLOCATION_PRECISION`] decimal places.
//! 2. `remaining = 100 - value` is spread over the other six buckets in
//!    proportion to their previous shares.
//! 3. If the other six were all zero, `remaining` is split equally.
//!
//! Only the edited value is rounded. Redistributed shares keep full
//! precision so the total stays at 100 up to floating-point error.

use pitch_core::math::round_to_places;
use pitch_core::types::{Allocation, AllocationBucket};

/// Decimal places kept on an edited allocation value.
pub const ALLOCATION_PRECISION: u32 = 2;

/// Number of buckets that absorb an edit.
const OTHER_BUCKETS: f64 = (AllocationBucket::ALL.len() - 1) as f64;

/// Prepares a requested share for the normaliser: clamp to `[0, 100]`, then
/// round to [`ALLOCATION_PRECISION`] places. NaN maps to 0.
///
/// # Examples
///
/// ```
/// use pitch_engine::allocation::clamp_allocation_value;
///
/// assert_eq!(clamp_allocation_value(33.3333), 33.33);
/// assert_eq!(clamp_allocation_value(120.0), 100.0);
/// assert_eq!(clamp_allocation_value(-4.0), 0.0);
/// ```
pub fn clamp_allocation_value(value: f64) -> f64 {
    round_to_places(value.clamp(0.0, 100.0), ALLOCATION_PRECISION)
}

/// Sets `changed` to `new_value` and rebalances the other six buckets.
///
/// The edited bucket ends up holding exactly
/// [`clamp_allocation_value`]`(new_value)`. The other buckets are scaled by
/// `remaining / other_total` using their values in `current`; when
/// `other_total` is zero they each receive `remaining / 6`.
///
/// Because the edited value is clamped, a non-negative `current` never
/// produces negative shares.
///
/// # Examples
///
/// ```
/// use pitch_core::types::{Allocation, AllocationBucket};
/// use pitch_engine::allocation::normalize_allocation;
///
/// let next = normalize_allocation(&Allocation::default(), AllocationBucket::Team, 50.0);
/// assert_eq!(next.team, 50.0);
/// assert!((next.total() - 100.0).abs() < 1e-9);
/// assert!((next.rnd - 16.6667).abs() < 1e-4);
/// ```
pub fn normalize_allocation(
    current: &Allocation,
    changed: AllocationBucket,
    new_value: f64,
) -> Allocation {
    let value = clamp_allocation_value(new_value);
    let remaining = 100.0 - value;

    let other_total: f64 = current
        .iter()
        .filter(|(bucket, _)| *bucket != changed)
        .map(|(_, share)| share)
        .sum();

    let mut next = *current;
    if other_total == 0.0 {
        let equal_share = remaining / OTHER_BUCKETS;
        for bucket in AllocationBucket::ALL.into_iter().filter(|b| *b != changed) {
            next.set(bucket, equal_share);
        }
    } else {
        let ratio = remaining / other_total;
        for bucket in AllocationBucket::ALL.into_iter().filter(|b| *b != changed) {
            next.set(bucket, current.get(bucket) * ratio);
        }
    }
    next.set(changed, value);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_team_to_50() {
        let next = normalize_allocation(&Allocation::default(), AllocationBucket::Team, 50.0);
        let ratio = 50.0 / 60.0;

        assert_eq!(next.team, 50.0);
        assert_relative_eq!(next.rnd, 20.0 * ratio, epsilon = 1e-12);
        assert_relative_eq!(next.rnd, 16.67, epsilon = 0.005);
        assert_relative_eq!(next.partnerships, 4.17, epsilon = 0.005);
        assert_relative_eq!(next.infrastructure, 8.33, epsilon = 0.005);
        assert_relative_eq!(next.compliance, 4.17, epsilon = 0.005);
        assert_relative_eq!(next.sales, 12.5, epsilon = 1e-12);
        assert_relative_eq!(next.buffer, 4.17, epsilon = 0.005);
        assert_relative_eq!(next.total(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_pool_splits_equally() {
        let mut current = Allocation::zeroed();
        current.team = 100.0;

        let next = normalize_allocation(&current, AllocationBucket::Team, 40.0);
        assert_eq!(next.team, 40.0);
        for (bucket, share) in next.iter() {
            if bucket != AllocationBucket::Team {
                assert_relative_eq!(share, 10.0, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(next.total(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_edit_to_100_zeroes_others() {
        let next = normalize_allocation(&Allocation::default(), AllocationBucket::Buffer, 100.0);
        assert_eq!(next.buffer, 100.0);
        for (bucket, share) in next.iter() {
            if bucket != AllocationBucket::Buffer {
                assert_eq!(share, 0.0);
            }
        }
    }

    #[test]
    fn test_edit_from_100_uses_equal_split() {
        let first = normalize_allocation(&Allocation::default(), AllocationBucket::Sales, 100.0);
        let second = normalize_allocation(&first, AllocationBucket::Sales, 70.0);
        assert_eq!(second.sales, 70.0);
        assert_relative_eq!(second.team, 5.0, epsilon = 1e-12);
        assert_relative_eq!(second.total(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_value_above_100_is_clamped() {
        let next = normalize_allocation(&Allocation::default(), AllocationBucket::RnD, 130.0);
        assert_eq!(next.rnd, 100.0);
        assert!(next.values().iter().all(|v| *v >= 0.0));
        assert_relative_eq!(next.total(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_value_is_clamped() {
        let next = normalize_allocation(&Allocation::default(), AllocationBucket::Team, -10.0);
        assert_eq!(next.team, 0.0);
        assert_relative_eq!(next.rnd, 20.0 * 100.0 / 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_edited_value_rounded_to_two_places() {
        let next = normalize_allocation(&Allocation::default(), AllocationBucket::Team, 33.33333);
        assert_eq!(next.team, 33.33);
        assert_relative_eq!(next.total(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_relative_weights_preserved() {
        let next = normalize_allocation(&Allocation::default(), AllocationBucket::Compliance, 25.0);
        assert_relative_eq!(next.rnd / next.partnerships, 4.0, epsilon = 1e-12);
        assert_relative_eq!(next.team / next.infrastructure, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let current = Allocation::default();
        let _ = normalize_allocation(&current, AllocationBucket::Team, 10.0);
        assert_eq!(current, Allocation::default());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn bucket_strategy() -> impl Strategy<Value = AllocationBucket> {
            (0usize..7).prop_map(|i| AllocationBucket::ALL[i])
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn test_sum_is_100_with_nonzero_pool(
                values in prop::array::uniform7(0.0f64..100.0),
                bucket in bucket_strategy(),
                new_value in 0.0f64..=100.0
            ) {
                let current = Allocation::from_values(values);
                let next = normalize_allocation(&current, bucket, new_value);
                prop_assert!((next.total() - 100.0).abs() < 1e-6, "total = {}", next.total());
                prop_assert_eq!(next.get(bucket), clamp_allocation_value(new_value));
            }

            #[test]
            fn test_equal_split_with_zero_pool(
                own in 0.0f64..100.0,
                bucket in bucket_strategy(),
                new_value in 0.0f64..=100.0
            ) {
                let mut current = Allocation::zeroed();
                current.set(bucket, own);
                let next = normalize_allocation(&current, bucket, new_value);

                let others: Vec<f64> = next
                    .iter()
                    .filter(|(b, _)| *b != bucket)
                    .map(|(_, v)| v)
                    .collect();
                prop_assert!(others.windows(2).all(|w| w[0] == w[1]));
                prop_assert!((next.total() - 100.0).abs() < 1e-6);
            }

            #[test]
            fn test_never_negative_for_non_negative_input(
                values in prop::array::uniform7(0.0f64..100.0),
                bucket in bucket_strategy(),
                new_value in -50.0f64..150.0
            ) {
                let next = normalize_allocation(&Allocation::from_values(values), bucket, new_value);
                prop_assert!(next.values().iter().all(|v| *v >= 0.0));
            }
        }
    }
}
