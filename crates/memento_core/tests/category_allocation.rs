use memento_core::allocation::{category_counts, split_segments};
use memento_core::{build_all_week_category_indices, build_segment_category_indices, Category};

fn two_categories() -> Vec<Category> {
    vec![
        Category::new("work", "Work", "#111111", 50, 10),
        Category::new("family", "Family", "#222222", 50, 90),
    ]
}

#[test]
fn segment_has_exact_length_and_is_deterministic() {
    let first = build_segment_category_indices(10, &[50.0, 30.0, 20.0], 1234);
    let second = build_segment_category_indices(10, &[50.0, 30.0, 20.0], 1234);

    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
}

#[test]
fn segment_output_is_pinned_for_reference_seed() {
    assert_eq!(
        build_segment_category_indices(10, &[50.0, 30.0, 20.0], 1234),
        vec![2, 1, 0, 0, 2, 0, 0, 1, 0, 1]
    );
    assert_eq!(
        build_segment_category_indices(7, &[50.0, 30.0, 20.0], 1),
        vec![2, 0, 0, 1, 1, 0, 0]
    );
}

#[test]
fn segment_uses_largest_remainder_quotas() {
    let result = build_segment_category_indices(7, &[50.0, 30.0, 20.0], 1);

    assert_eq!(category_counts(&result, 3), vec![4, 2, 1]);
}

#[test]
fn different_seeds_keep_counts_but_change_order() {
    let a = build_segment_category_indices(200, &[25.0, 25.0, 50.0], 7);
    let b = build_segment_category_indices(200, &[25.0, 25.0, 50.0], 8);

    assert_eq!(category_counts(&a, 3), category_counts(&b, 3));
    assert_ne!(a, b);
}

#[test]
fn empty_inputs_yield_empty_segments() {
    assert!(build_segment_category_indices(0, &[100.0], 1).is_empty());
    assert!(build_segment_category_indices(10, &[], 1).is_empty());
}

#[test]
fn off_hundred_percentages_still_fill_every_slot() {
    let under = build_segment_category_indices(20, &[10.0, 10.0], 3);
    let over = build_segment_category_indices(20, &[90.0, 90.0], 3);

    assert_eq!(under.len(), 20);
    assert_eq!(over.len(), 20);
    assert_eq!(category_counts(&over, 2), vec![10, 10]);
}

#[test]
fn all_weeks_combine_past_and_future_segments() {
    let result = build_all_week_category_indices(4, 10, &two_categories());
    assert_eq!(result.len(), 10);

    let (past, future) = split_segments(&result, 4);
    assert_eq!(past.iter().filter(|&&index| index == 1).count(), 2);
    assert_eq!(future.iter().filter(|&&index| index == 1).count(), 5);
    assert_eq!(past, &[1, 1, 0, 0]);
    assert_eq!(future, &[1, 1, 1, 0, 1, 1]);
}

#[test]
fn all_weeks_clamp_lived_to_total() {
    let result = build_all_week_category_indices(50, 10, &two_categories());

    assert_eq!(result.len(), 10);
    assert_eq!(category_counts(&result, 2), vec![5, 5]);
}

#[test]
fn all_weeks_handle_degenerate_inputs() {
    assert!(build_all_week_category_indices(4, 10, &[]).is_empty());
    assert!(build_all_week_category_indices(0, 0, &two_categories()).is_empty());

    let all_future = build_all_week_category_indices(0, 10, &two_categories());
    assert_eq!(category_counts(&all_future, 2), vec![1, 9]);
}

#[test]
fn past_and_future_use_distinct_seeds() {
    let categories = vec![
        Category::new("a", "A", "#111111", 50, 50),
        Category::new("b", "B", "#222222", 50, 50),
    ];
    let result = build_all_week_category_indices(100, 200, &categories);
    let (past, future) = split_segments(&result, 100);

    assert_eq!(category_counts(past, 2), category_counts(future, 2));
    assert_ne!(past, future);
}
