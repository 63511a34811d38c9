//! Keyboard navigation and week status labels.

use crate::config::GRID_COLUMNS;
use crate::week::{get_week_date_range, WeekMathError};
use std::fmt::{Display, Formatter};

/// Arrow keys understood by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
}

impl NavKey {
    /// Maps DOM/Flutter-style key names (`ArrowLeft`, ...) to a nav key.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            _ => None,
        }
    }

    /// Index delta: `±1` horizontally, `±52` (one row) vertically.
    pub fn delta(self) -> i64 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
            Self::Up => -i64::from(GRID_COLUMNS),
            Self::Down => i64::from(GRID_COLUMNS),
        }
    }
}

/// Moves a selection by one key press, clamped to `[0, total_weeks - 1]`.
///
/// Returns `None` for an empty grid.
pub fn step_selection(current: u32, key: NavKey, total_weeks: u32) -> Option<u32> {
    let last = total_weeks.checked_sub(1)?;
    let next = (i64::from(current) + key.delta()).clamp(0, i64::from(last));
    Some(next as u32)
}

/// Where a week sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStatus {
    Lived,
    Now,
    Remaining,
}

impl WeekStatus {
    pub fn classify(week_index: u32, weeks_lived: u32) -> Self {
        match week_index.cmp(&weeks_lived) {
            std::cmp::Ordering::Less => Self::Lived,
            std::cmp::Ordering::Equal => Self::Now,
            std::cmp::Ordering::Greater => Self::Remaining,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lived => "lived",
            Self::Now => "now",
            Self::Remaining => "remaining",
        }
    }
}

impl Display for WeekStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen-reader line for a selected week, e.g.
/// `Week 3, 2000-01-15 to 2000-01-21, lived`.
pub fn describe_week(
    birth_date_iso: &str,
    week_index: u32,
    weeks_lived: u32,
) -> Result<String, WeekMathError> {
    let range = get_week_date_range(birth_date_iso, week_index)?;
    Ok(format!(
        "Week {}, {} to {}, {}",
        u64::from(week_index) + 1,
        range.start_iso(),
        range.end_iso(),
        WeekStatus::classify(week_index, weeks_lived)
    ))
}
