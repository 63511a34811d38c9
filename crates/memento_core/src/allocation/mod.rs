//! Deterministic category allocation for week cells.
//!
//! # Responsibility
//! - Turn category percentages into exact per-segment slot counts using the
//!   largest-remainder (Hamilton) method.
//! - Spread those slots over the segment with a seeded Fisher-Yates shuffle.
//!
//! # Invariants
//! - Output length equals the requested slot count whenever any category
//!   exists, even if percentages do not sum to 100.
//! - Identical `(slots, percentages, seed)` always yield identical output.
//! - Past and future segments use distinct fixed seeds.

mod rng;

pub use rng::Lcg32;

use crate::config::{FUTURE_SEGMENT_SEED, PAST_SEGMENT_SEED};
use crate::model::category::Category;
use std::cmp::Ordering;

/// Assigns `total_slots` slots to category indices in proportion to
/// `percentages`, then shuffles them with `seed`.
///
/// Non-finite or negative percentages count as `0`. When the floored
/// quotas fall short of `total_slots` the leftover slots go to categories
/// by descending fractional remainder (ties keep input order), cycling if
/// more slots are left than categories exist. When percentages overshoot
/// 100 the excess is taken back starting from the smallest remainder.
pub fn build_segment_category_indices(
    total_slots: usize,
    percentages: &[f64],
    seed: u32,
) -> Vec<usize> {
    if total_slots == 0 || percentages.is_empty() {
        return Vec::new();
    }

    let quotas = apportion(total_slots, percentages);
    let mut slots = Vec::with_capacity(total_slots);
    for (category_index, &count) in quotas.iter().enumerate() {
        slots.extend(std::iter::repeat(category_index).take(count));
    }

    let mut rng = Lcg32::new(seed);
    for i in (1..slots.len()).rev() {
        let j = rng.next_index(i + 1);
        slots.swap(i, j);
    }
    slots
}

/// Builds the full-lifespan assignment: past segment then future segment.
///
/// `weeks_lived` is clamped to `total_weeks`. An empty category list yields
/// an empty assignment.
pub fn build_all_week_category_indices(
    weeks_lived: u32,
    total_weeks: u32,
    categories: &[Category],
) -> Vec<usize> {
    if total_weeks == 0 || categories.is_empty() {
        return Vec::new();
    }

    let past_weeks = weeks_lived.min(total_weeks) as usize;
    let future_weeks = total_weeks as usize - past_weeks;

    let past_percents = categories
        .iter()
        .map(|category| f64::from(category.past_percent))
        .collect::<Vec<_>>();
    let future_percents = categories
        .iter()
        .map(|category| f64::from(category.future_percent))
        .collect::<Vec<_>>();

    let mut indices =
        build_segment_category_indices(past_weeks, &past_percents, PAST_SEGMENT_SEED);
    indices.extend(build_segment_category_indices(
        future_weeks,
        &future_percents,
        FUTURE_SEGMENT_SEED,
    ));
    indices
}

/// Splits an assignment into its `(past, future)` segments.
pub fn split_segments(indices: &[usize], weeks_lived: u32) -> (&[usize], &[usize]) {
    indices.split_at((weeks_lived as usize).min(indices.len()))
}

/// Counts how many slots each category index occupies.
///
/// Indices `>= category_count` are ignored.
pub fn category_counts(indices: &[usize], category_count: usize) -> Vec<usize> {
    let mut counts = vec![0; category_count];
    for &index in indices {
        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
    }
    counts
}

fn apportion(total_slots: usize, percentages: &[f64]) -> Vec<usize> {
    let raw = percentages
        .iter()
        .map(|&percent| {
            let percent = if percent.is_finite() { percent.max(0.0) } else { 0.0 };
            percent / 100.0 * total_slots as f64
        })
        .collect::<Vec<_>>();
    let mut quotas = raw.iter().map(|value| value.floor() as usize).collect::<Vec<_>>();

    let mut by_fraction = (0..raw.len()).collect::<Vec<_>>();
    // `sort_by` is stable, so equal fractions keep category order.
    by_fraction.sort_by(|&a, &b| {
        let fraction_a = raw[a] - raw[a].floor();
        let fraction_b = raw[b] - raw[b].floor();
        fraction_b.partial_cmp(&fraction_a).unwrap_or(Ordering::Equal)
    });

    let assigned = quotas.iter().sum::<usize>();
    if assigned < total_slots {
        // Leftovers beyond the category count keep cycling in fraction order,
        // so `(10, [0, 0])` splits 5/5 rather than handing every extra slot
        // to category 0.
        for step in 0..total_slots - assigned {
            quotas[by_fraction[step % by_fraction.len()]] += 1;
        }
    } else if assigned > total_slots {
        let mut excess = assigned - total_slots;
        let mut cursor = 0;
        while excess > 0 {
            let index = by_fraction[by_fraction.len() - 1 - cursor % by_fraction.len()];
            if quotas[index] > 0 {
                quotas[index] -= 1;
                excess -= 1;
            }
            cursor += 1;
        }
    }
    quotas
}

#[cfg(test)]
mod tests {
    use super::apportion;

    #[test]
    fn apportion_distributes_remainder_by_largest_fraction() {
        assert_eq!(apportion(7, &[50.0, 30.0, 20.0]), vec![4, 2, 1]);
    }

    #[test]
    fn apportion_breaks_fraction_ties_by_input_order() {
        assert_eq!(apportion(2, &[50.0, 50.0, 50.0]), vec![1, 1, 0]);
        assert_eq!(apportion(1, &[50.0, 50.0]), vec![1, 0]);
    }

    #[test]
    fn apportion_cycles_when_under_subscribed() {
        assert_eq!(apportion(10, &[0.0, 0.0]), vec![5, 5]);
        assert_eq!(apportion(10, &[10.0, 10.0]).iter().sum::<usize>(), 10);
    }

    #[test]
    fn apportion_trims_when_over_subscribed() {
        let quotas = apportion(10, &[80.0, 80.0]);
        assert_eq!(quotas.iter().sum::<usize>(), 10);
        assert_eq!(quotas, vec![5, 5]);
    }

    #[test]
    fn apportion_ignores_negative_and_nan_percentages() {
        assert_eq!(apportion(4, &[-50.0, f64::NAN, 100.0]), vec![0, 0, 4]);
    }
}
