//! Derived lifespan metrics.
//!
//! # Invariants
//! - `weeks_lived + weeks_remaining == total_weeks`.
//! - `weeks_lived <= total_weeks`.
//! - `grid_rows == ceil(total_weeks / grid_cols)` and `grid_cols == 52`.
//! - Values are recomputed from inputs, never patched in place.

use serde::{Deserialize, Serialize};

/// Summary of a lifespan measured in weeks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub total_weeks: u32,
    pub weeks_lived: u32,
    pub weeks_remaining: u32,
    /// `0.0..=100.0`; `0.0` when `total_weeks == 0`.
    pub percent_lived: f64,
    /// Index of the week cell holding "today". Equal to `weeks_lived`.
    pub today_week_index: u32,
    pub grid_rows: u32,
    pub grid_cols: u32,
}

impl DerivedMetrics {
    /// Whether every week of the expected lifespan has been lived.
    pub fn is_complete(&self) -> bool {
        self.weeks_remaining == 0
    }

    /// Remaining weeks expressed in 52-week years.
    pub fn years_remaining(&self) -> f64 {
        f64::from(self.weeks_remaining) / f64::from(self.grid_cols.max(1))
    }
}
