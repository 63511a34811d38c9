//! Life category model.
//!
//! # Responsibility
//! - Define the named slices of time the grid is allocated across.
//! - Offer form-level validation helpers for hosts editing categories.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a category and unique in a list.
//! - Percent sums of 100 are enforced by the editing layer, not here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// Color assigned to freshly added categories.
pub const NEW_CATEGORY_COLOR: &str = "#A0A0A0";

/// Named allocation bucket for lived and remaining weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier used for list editing.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `#RRGGBB` fill color.
    pub color: String,
    /// Share of lived weeks, in percent.
    pub past_percent: u32,
    /// Share of remaining weeks, in percent.
    pub future_percent: u32,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        past_percent: u32,
        future_percent: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            past_percent,
            future_percent,
        }
    }

    /// Checks form-level constraints for one category.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `InvalidColor` when `color` is not `#RRGGBB`.
    /// - `PercentOutOfRange` when either percent exceeds 100.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.id.trim().is_empty() {
            return Err(CategoryValidationError::EmptyId);
        }
        if !HEX_COLOR_RE.is_match(self.color.as_str()) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }
        for value in [self.past_percent, self.future_percent] {
            if value > 100 {
                return Err(CategoryValidationError::PercentOutOfRange(value));
            }
        }
        Ok(())
    }
}

/// Sums `(past, future)` percentages across categories, saturating at
/// `u32::MAX`.
pub fn percent_totals(categories: &[Category]) -> (u32, u32) {
    categories.iter().fold((0u32, 0u32), |(past, future), category| {
        (
            past.saturating_add(category.past_percent),
            future.saturating_add(category.future_percent),
        )
    })
}

/// Returns whether both segments add up to exactly 100%.
///
/// An empty list is never complete.
pub fn is_allocation_complete(categories: &[Category]) -> bool {
    !categories.is_empty() && percent_totals(categories) == (100, 100)
}

/// Starter categories offered to first-time users.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("work", "Work", "#4A90D9", 35, 25),
        Category::new("family", "Family", "#E07A5F", 20, 30),
        Category::new("rest", "Rest", "#81B29A", 25, 20),
        Category::new("growth", "Growth", "#F2CC8F", 10, 15),
        Category::new("play", "Play", "#9B72CF", 10, 10),
    ]
}

/// Category validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyId,
    InvalidColor(String),
    PercentOutOfRange(u32),
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "category id must not be empty"),
            Self::InvalidColor(value) => {
                write!(f, "category color must be #RRGGBB, got `{value}`")
            }
            Self::PercentOutOfRange(value) => {
                write!(f, "category percent must be within 0..=100, got {value}")
            }
        }
    }
}

impl Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::{default_categories, is_allocation_complete, percent_totals, Category};
    use super::CategoryValidationError;

    #[test]
    fn default_categories_are_complete_and_valid() {
        let categories = default_categories();
        assert_eq!(percent_totals(&categories), (100, 100));
        assert!(is_allocation_complete(&categories));
        for category in &categories {
            category.validate().expect("default category should validate");
        }
    }

    #[test]
    fn validate_rejects_short_hex_color() {
        let category = Category::new("a", "A", "#FFF", 10, 10);
        assert_eq!(
            category.validate().unwrap_err(),
            CategoryValidationError::InvalidColor("#FFF".to_string())
        );
    }

    #[test]
    fn validate_rejects_blank_id_and_oversized_percent() {
        let blank = Category::new("  ", "A", "#FFFFFF", 10, 10);
        assert_eq!(blank.validate().unwrap_err(), CategoryValidationError::EmptyId);

        let oversized = Category::new("a", "A", "#FFFFFF", 101, 10);
        assert_eq!(
            oversized.validate().unwrap_err(),
            CategoryValidationError::PercentOutOfRange(101)
        );
    }

    #[test]
    fn empty_list_is_never_complete() {
        assert!(!is_allocation_complete(&[]));
    }

    #[test]
    fn totals_saturate_on_huge_percents() {
        let categories = vec![
            Category::new("a", "A", "#FFFFFF", u32::MAX, 50),
            Category::new("b", "B", "#FFFFFF", 1, 50),
        ];
        assert_eq!(percent_totals(&categories), (u32::MAX, 100));
        assert!(!is_allocation_complete(&categories));
    }
}
