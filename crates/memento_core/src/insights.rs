//! Reflection prompts derived from metrics and categories.
//!
//! # Invariants
//! - Always returns exactly `INSIGHT_COUNT` non-empty lines.
//! - Output depends only on the arguments.

use crate::model::category::Category;
use crate::model::metrics::DerivedMetrics;

pub const INSIGHT_COUNT: usize = 5;

const NO_CATEGORY_INSIGHTS: [&str; INSIGHT_COUNT] = [
    "You have a finite grid. Define at least one category to make that time intentional.",
    "Your lived and remaining weeks become clearer once your categories are concrete.",
    "A single category can still reveal where your attention is actually going.",
    "Try assigning future percentages before changing anything else.",
    "Use the next 7 days as a small experiment before changing your full plan.",
];

/// Builds five reflection lines for the summary panel.
pub fn generate_reflection_insights(
    metrics: &DerivedMetrics,
    categories: &[Category],
) -> Vec<String> {
    let Some(first) = categories.first() else {
        return NO_CATEGORY_INSIGHTS.iter().map(|line| line.to_string()).collect();
    };

    // Ties keep the earliest category.
    let mut dominant_past = first;
    let mut dominant_future = first;
    let mut largest_shift = (first, shift_of(first));
    for category in &categories[1..] {
        if category.past_percent > dominant_past.past_percent {
            dominant_past = category;
        }
        if category.future_percent > dominant_future.future_percent {
            dominant_future = category;
        }
        let shift = shift_of(category);
        if shift.abs() > largest_shift.1.abs() {
            largest_shift = (category, shift);
        }
    }

    let remaining = f64::from(metrics.weeks_remaining);
    let one_percent_weeks = ((remaining / 100.0).round() as u64).max(1);
    let dominant_future_weeks = f64::from(dominant_future.future_percent) / 100.0 * remaining;
    let (shift_category, shift) = largest_shift;
    let shift_weeks = shift.unsigned_abs() as f64 / 100.0 * remaining;

    let shift_line = if shift >= 0 {
        format!(
            "Your biggest intended shift is +{shift}% toward {} (~{} weeks). What will you deliberately reduce to fund that change?",
            shift_category.name,
            round_weeks(shift_weeks)
        )
    } else {
        format!(
            "Your biggest intended shift is {shift}% away from {} (~{} weeks). What boundary will protect that decision?",
            shift_category.name,
            round_weeks(shift_weeks)
        )
    };

    vec![
        format!(
            "You have {} weeks left (~{:.1} years). What matters enough to claim the next 52 weeks on purpose?",
            group_thousands(u64::from(metrics.weeks_remaining)),
            metrics.years_remaining()
        ),
        format!(
            "Your past is dominated by {} at {}%. Did that happen by design, or by inertia?",
            dominant_past.name, dominant_past.past_percent
        ),
        format!(
            "Your plan gives {} about {} of your remaining weeks. Is that enough for who you want to become?",
            dominant_future.name,
            round_weeks(dominant_future_weeks)
        ),
        shift_line,
        format!(
            "A 1% allocation change is roughly {} weeks. Which category deserves your next 1% right now?",
            group_thousands(one_percent_weeks)
        ),
    ]
}

fn shift_of(category: &Category) -> i64 {
    i64::from(category.future_percent) - i64::from(category.past_percent)
}

fn round_weeks(weeks: f64) -> String {
    group_thousands(weeks.round().max(0.0) as u64)
}

/// Formats with `,` thousands separators: `2572` -> `2,572`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::group_thousands;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(2_572), "2,572");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
