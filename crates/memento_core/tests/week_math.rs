use chrono::{DateTime, TimeZone, Utc};
use memento_core::{compute_derived_metrics, get_week_date_range, WeekMathError};

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

#[test]
fn future_birth_date_clamps_to_zero_weeks_lived() {
    let metrics = compute_derived_metrics("2100-01-01", 80, utc(2026, 2, 11, 0, 0)).unwrap();

    assert_eq!(metrics.weeks_lived, 0);
    assert_eq!(metrics.weeks_remaining, 4160);
    assert_eq!(metrics.total_weeks, 4160);
    assert_eq!(metrics.percent_lived, 0.0);
}

#[test]
fn age_beyond_expectancy_clamps_to_total_weeks() {
    let metrics = compute_derived_metrics("1900-01-01", 80, utc(2026, 2, 11, 0, 0)).unwrap();

    assert_eq!(metrics.weeks_lived, 4160);
    assert_eq!(metrics.weeks_remaining, 0);
    assert_eq!(metrics.percent_lived, 100.0);
    assert!(metrics.is_complete());
}

#[test]
fn weeks_lived_floors_partial_weeks() {
    let thirteen_days = compute_derived_metrics("2000-01-01", 80, utc(2000, 1, 14, 0, 0)).unwrap();
    let fourteen_days = compute_derived_metrics("2000-01-01", 80, utc(2000, 1, 15, 0, 0)).unwrap();

    assert_eq!(thirteen_days.weeks_lived, 1);
    assert_eq!(fourteen_days.weeks_lived, 2);
}

#[test]
fn time_of_day_is_ignored() {
    let morning = compute_derived_metrics("2000-01-01", 80, utc(2000, 1, 14, 0, 1)).unwrap();
    let night = compute_derived_metrics("2000-01-01", 80, utc(2000, 1, 14, 23, 59)).unwrap();

    assert_eq!(morning, night);
}

#[test]
fn metrics_hold_structural_invariants() {
    let now = utc(2026, 2, 11, 12, 0);
    for (birth, years) in [
        ("1950-06-30", 40),
        ("1988-05-11", 86),
        ("1990-01-01", 80),
        ("2024-02-29", 120),
        ("2030-01-01", 75),
    ] {
        let metrics = compute_derived_metrics(birth, years, now).unwrap();
        assert_eq!(
            metrics.weeks_lived + metrics.weeks_remaining,
            metrics.total_weeks,
            "birth={birth}"
        );
        assert!(metrics.weeks_lived <= metrics.total_weeks);
        assert_eq!(metrics.total_weeks, years * 52);
        assert_eq!(metrics.grid_cols, 52);
        assert_eq!(metrics.grid_rows, years);
        assert_eq!(metrics.today_week_index, metrics.weeks_lived);
        let expected_percent =
            f64::from(metrics.weeks_lived) / f64::from(metrics.total_weeks) * 100.0;
        assert!((metrics.percent_lived - expected_percent).abs() < 1e-9);
    }
}

#[test]
fn zero_life_expectancy_yields_empty_grid() {
    let metrics = compute_derived_metrics("1990-01-01", 0, utc(2026, 2, 11, 0, 0)).unwrap();

    assert_eq!(metrics.total_weeks, 0);
    assert_eq!(metrics.weeks_lived, 0);
    assert_eq!(metrics.grid_rows, 0);
    assert_eq!(metrics.percent_lived, 0.0);
}

#[test]
fn malformed_birth_date_is_reported() {
    let err = compute_derived_metrics("not-a-date", 80, utc(2026, 2, 11, 0, 0)).unwrap_err();
    assert_eq!(err, WeekMathError::MalformedDate("not-a-date".to_string()));

    let err = compute_derived_metrics("", 80, utc(2026, 2, 11, 0, 0)).unwrap_err();
    assert_eq!(err, WeekMathError::EmptyDate);
}

#[test]
fn week_date_range_spans_seven_days() {
    let range = get_week_date_range("2000-01-01", 2).unwrap();

    assert_eq!(range.start_iso(), "2000-01-15");
    assert_eq!(range.end_iso(), "2000-01-21");
}

#[test]
fn week_date_range_crosses_month_and_leap_day() {
    let range = get_week_date_range("2024-02-20", 1).unwrap();

    assert_eq!(range.start_iso(), "2024-02-27");
    assert_eq!(range.end_iso(), "2024-03-04");
}

#[test]
fn week_date_range_has_no_upper_bound_check() {
    let range = get_week_date_range("2000-01-01", 10_000).unwrap();

    assert_eq!(range.start_iso(), "2191-08-27");
    assert_eq!(range.end_iso(), "2191-09-02");
}
