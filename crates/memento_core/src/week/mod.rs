//! Date and week arithmetic.
//!
//! # Responsibility
//! - Parse `YYYY-MM-DD` birth dates into UTC calendar days.
//! - Convert birth date + life expectancy into week counts.
//! - Map a week index back to its calendar date range.
//!
//! # Invariants
//! - All arithmetic uses calendar days; there is no time-of-day component.
//! - Week counts are clamped into `[0, total_weeks]`.

mod math;

pub use math::{
    clamp, compute_derived_metrics, format_calendar_date, get_week_date_range,
    parse_calendar_date, WeekDateRange, WeekMathError, DAYS_PER_WEEK,
};
