use crate::config::GRID_COLUMNS;
use crate::model::metrics::DerivedMetrics;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DAYS_PER_WEEK: i64 = 7;

/// Week math failures. All of them mean "metrics unavailable" to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekMathError {
    /// Input was blank.
    EmptyDate,
    /// A date component was missing where required or not a decimal number.
    MalformedDate(String),
    /// Components parsed but do not name a real calendar day.
    DateOutOfRange { year: i32, month: u32, day: u32 },
    /// `birth + week_index * 7` left chrono's representable range.
    WeekIndexOverflow(u32),
}

impl Display for WeekMathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDate => write!(f, "date input must not be empty"),
            Self::MalformedDate(value) => {
                write!(f, "date must be YYYY-MM-DD, got `{value}`")
            }
            Self::DateOutOfRange { year, month, day } => {
                write!(f, "date {year:04}-{month:02}-{day:02} does not exist")
            }
            Self::WeekIndexOverflow(index) => {
                write!(f, "week index {index} is beyond the supported calendar")
            }
        }
    }
}

impl Error for WeekMathError {}

/// Clamps `value` into `[min, max]`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Parses a `YYYY-MM-DD` string into a calendar day.
///
/// Missing month or day components default to `1`, so `"1990"` parses as
/// `1990-01-01` and `"1990-06"` as `1990-06-01`. Present components must be
/// plain decimal digits.
///
/// # Errors
/// - `EmptyDate` for blank input.
/// - `MalformedDate` for non-numeric or surplus components.
/// - `DateOutOfRange` for components naming no real day (`2001-02-29`).
pub fn parse_calendar_date(iso: &str) -> Result<NaiveDate, WeekMathError> {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return Err(WeekMathError::EmptyDate);
    }

    let parts = trimmed.split('-').collect::<Vec<_>>();
    if parts.len() > 3 {
        return Err(WeekMathError::MalformedDate(trimmed.to_string()));
    }

    let malformed = || WeekMathError::MalformedDate(trimmed.to_string());
    let year = parse_component(parts[0]).ok_or_else(malformed)?;
    let month = match parts.get(1) {
        Some(raw) => parse_component(raw).ok_or_else(malformed)?,
        None => 1,
    };
    let day = match parts.get(2) {
        Some(raw) => parse_component(raw).ok_or_else(malformed)?,
        None => 1,
    };

    let year = i32::try_from(year).map_err(|_| malformed())?;
    let month = u32::try_from(month).map_err(|_| malformed())?;
    let day = u32::try_from(day).map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(WeekMathError::DateOutOfRange {
        year,
        month,
        day,
    })
}

fn parse_component(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Formats a calendar day as `YYYY-MM-DD`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Computes week metrics for a birth date, life expectancy and instant.
///
/// `now` is reduced to its UTC calendar day before subtracting, so the
/// result never drifts across daylight-saving changes.
///
/// # Errors
/// Returns the `parse_calendar_date` error for an unparseable birth date.
pub fn compute_derived_metrics(
    birth_date_iso: &str,
    life_expectancy_years: u32,
    now: DateTime<Utc>,
) -> Result<DerivedMetrics, WeekMathError> {
    let birth = parse_calendar_date(birth_date_iso)?;
    Ok(DerivedMetrics::from_dates(
        birth,
        life_expectancy_years,
        now.date_naive(),
    ))
}

impl DerivedMetrics {
    /// Computes metrics from already-parsed calendar days.
    ///
    /// A birth date after `today` yields zero lived weeks; an age past the
    /// expectancy yields every week lived.
    pub fn from_dates(birth: NaiveDate, life_expectancy_years: u32, today: NaiveDate) -> Self {
        let total_weeks = life_expectancy_years.saturating_mul(GRID_COLUMNS);
        let elapsed_days = today.signed_duration_since(birth).num_days();
        let raw_weeks_lived = elapsed_days.div_euclid(DAYS_PER_WEEK);
        let weeks_lived = clamp(raw_weeks_lived, 0, i64::from(total_weeks)) as u32;
        let weeks_remaining = total_weeks - weeks_lived;

        Self {
            total_weeks,
            weeks_lived,
            weeks_remaining,
            percent_lived: if total_weeks == 0 {
                0.0
            } else {
                f64::from(weeks_lived) / f64::from(total_weeks) * 100.0
            },
            today_week_index: weeks_lived,
            grid_rows: total_weeks.div_ceil(GRID_COLUMNS),
            grid_cols: GRID_COLUMNS,
        }
    }
}

/// Inclusive calendar range covered by one week cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekDateRange {
    pub fn start_iso(&self) -> String {
        format_calendar_date(self.start)
    }

    pub fn end_iso(&self) -> String {
        format_calendar_date(self.end)
    }
}

/// Returns the seven-day range for `week_index` counted from birth.
///
/// No check against the lifespan is made here; indices past the last week
/// still resolve to real dates.
pub fn get_week_date_range(
    birth_date_iso: &str,
    week_index: u32,
) -> Result<WeekDateRange, WeekMathError> {
    let birth = parse_calendar_date(birth_date_iso)?;
    let overflow = || WeekMathError::WeekIndexOverflow(week_index);
    let start = birth
        .checked_add_days(Days::new(u64::from(week_index) * DAYS_PER_WEEK as u64))
        .ok_or_else(overflow)?;
    let end = start
        .checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))
        .ok_or_else(overflow)?;
    Ok(WeekDateRange { start, end })
}
