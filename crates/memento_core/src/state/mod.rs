//! Explicit app state plus pure reducer.
//!
//! # Responsibility
//! - Hold everything the host UI edits, as a plain value passed around.
//! - Apply user actions through `reduce`, returning a new state.
//!
//! # Invariants
//! - `reduce` is pure: identical inputs give identical outputs.
//! - The category list never becomes empty through `RemoveCategory`.
//! - Life expectancy stays within configured bounds.
//! - Category percents stay within `[0, 100]`.

use crate::config::clamp_life_expectancy;
use crate::grid::navigation::{step_selection, NavKey};
use crate::model::category::{Category, NEW_CATEGORY_COLOR};
use crate::model::input::{AppInputState, ColorScheme};
use uuid::Uuid;

const MAX_PERCENT: u32 = 100;

/// Which screen the host is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppStep {
    #[default]
    Input,
    Visualization,
}

/// Complete host-side state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub input: AppInputState,
    pub step: AppStep,
    pub hovered_week: Option<u32>,
    pub selected_week: Option<u32>,
}

/// Partial category update; `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub past_percent: Option<u32>,
    pub future_percent: Option<u32>,
}

/// User intents understood by `reduce`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    SetBirthDate(String),
    SetLifeExpectancy(u32),
    UpdateCategory { id: String, patch: CategoryPatch },
    /// Appends a default category with the given id.
    AddCategory { id: String },
    RemoveCategory(String),
    SetColorScheme(ColorScheme),
    SetStep(AppStep),
    SetHoveredWeek(Option<u32>),
    SelectWeek(Option<u32>),
    /// Moves the selection; starts from `today_week_index` when unset.
    Navigate {
        key: NavKey,
        total_weeks: u32,
        today_week_index: u32,
    },
    /// Replaces editable input, e.g. from storage or a share link.
    Hydrate(AppInputState),
    Reset,
}

impl AppAction {
    /// `AddCategory` with a fresh random id.
    pub fn add_category() -> Self {
        Self::AddCategory {
            id: Uuid::new_v4().to_string(),
        }
    }
}

/// Applies one action.
pub fn reduce(state: AppState, action: AppAction) -> AppState {
    let mut next = state;
    match action {
        AppAction::SetBirthDate(birth_date) => next.input.birth_date = birth_date,
        AppAction::SetLifeExpectancy(years) => {
            next.input.life_expectancy_years = clamp_life_expectancy(years);
        }
        AppAction::UpdateCategory { id, patch } => {
            if let Some(category) = next.input.categories.iter_mut().find(|c| c.id == id) {
                apply_patch(category, patch);
            }
        }
        AppAction::AddCategory { id } => {
            let ordinal = next.input.categories.len() + 1;
            next.input.categories.push(Category::new(
                id,
                format!("Category {ordinal}"),
                NEW_CATEGORY_COLOR,
                0,
                0,
            ));
        }
        AppAction::RemoveCategory(id) => {
            if next.input.categories.len() > 1 {
                next.input.categories.retain(|category| category.id != id);
            }
        }
        AppAction::SetColorScheme(scheme) => next.input.color_scheme = scheme,
        AppAction::SetStep(step) => next.step = step,
        AppAction::SetHoveredWeek(week) => next.hovered_week = week,
        AppAction::SelectWeek(week) => next.selected_week = week,
        AppAction::Navigate {
            key,
            total_weeks,
            today_week_index,
        } => {
            let from = next.selected_week.unwrap_or(today_week_index);
            if let Some(target) = step_selection(from, key, total_weeks) {
                next.selected_week = Some(target);
            }
        }
        AppAction::Hydrate(input) => {
            next.input = AppInputState {
                life_expectancy_years: clamp_life_expectancy(input.life_expectancy_years),
                categories: input
                    .categories
                    .into_iter()
                    .map(|category| Category {
                        past_percent: category.past_percent.min(MAX_PERCENT),
                        future_percent: category.future_percent.min(MAX_PERCENT),
                        ..category
                    })
                    .collect(),
                ..input
            };
        }
        AppAction::Reset => next = AppState::default(),
    }
    next
}

fn apply_patch(category: &mut Category, patch: CategoryPatch) {
    if let Some(name) = patch.name {
        category.name = name;
    }
    if let Some(color) = patch.color {
        category.color = color;
    }
    if let Some(past) = patch.past_percent {
        category.past_percent = past.min(MAX_PERCENT);
    }
    if let Some(future) = patch.future_percent {
        category.future_percent = future.min(MAX_PERCENT);
    }
}
