use memento_core::grid::navigation::NavKey;
use memento_core::{
    reduce, AppAction, AppInputState, AppState, AppStep, Category, CategoryPatch, ColorScheme,
};

fn state_with(categories: Vec<Category>) -> AppState {
    AppState {
        input: AppInputState {
            categories,
            ..AppInputState::default()
        },
        ..AppState::default()
    }
}

#[test]
fn default_state_starts_on_input_step() {
    let state = AppState::default();

    assert_eq!(state.step, AppStep::Input);
    assert_eq!(state.input.life_expectancy_years, 80);
    assert_eq!(state.input.color_scheme, ColorScheme::Obsidian);
    assert!(state.input.birth_date.is_empty());
    assert_eq!(state.input.categories.len(), 5);
    assert_eq!(state.selected_week, None);
}

#[test]
fn life_expectancy_is_clamped() {
    let state = reduce(AppState::default(), AppAction::SetLifeExpectancy(7));
    assert_eq!(state.input.life_expectancy_years, 40);

    let state = reduce(state, AppAction::SetLifeExpectancy(300));
    assert_eq!(state.input.life_expectancy_years, 120);

    let state = reduce(state, AppAction::SetLifeExpectancy(95));
    assert_eq!(state.input.life_expectancy_years, 95);
}

#[test]
fn update_category_patches_only_given_fields() {
    let state = state_with(vec![Category::new("a", "Work", "#111111", 40, 50)]);
    let state = reduce(
        state,
        AppAction::UpdateCategory {
            id: "a".to_string(),
            patch: CategoryPatch {
                name: Some("Craft".to_string()),
                future_percent: Some(70),
                ..CategoryPatch::default()
            },
        },
    );

    let category = &state.input.categories[0];
    assert_eq!(category.name, "Craft");
    assert_eq!(category.color, "#111111");
    assert_eq!(category.past_percent, 40);
    assert_eq!(category.future_percent, 70);
}

#[test]
fn update_of_unknown_category_is_a_no_op() {
    let before = state_with(vec![Category::new("a", "Work", "#111111", 40, 50)]);
    let after = reduce(
        before.clone(),
        AppAction::UpdateCategory {
            id: "missing".to_string(),
            patch: CategoryPatch {
                past_percent: Some(1),
                ..CategoryPatch::default()
            },
        },
    );

    assert_eq!(after, before);
}

#[test]
fn added_categories_get_unique_ids_and_zero_allocation() {
    let state = state_with(vec![Category::new("a", "Work", "#111111", 100, 100)]);
    let state = reduce(state, AppAction::add_category());
    let state = reduce(state, AppAction::add_category());

    let categories = &state.input.categories;
    assert_eq!(categories.len(), 3);
    assert_ne!(categories[1].id, categories[2].id);
    assert_eq!(categories[1].name, "Category 2");
    assert_eq!(categories[2].name, "Category 3");
    assert_eq!(categories[2].past_percent, 0);
    assert_eq!(categories[2].future_percent, 0);
    assert!(categories[2].validate().is_ok());
}

#[test]
fn last_category_cannot_be_removed() {
    let state = state_with(vec![
        Category::new("a", "Work", "#111111", 50, 50),
        Category::new("b", "Play", "#222222", 50, 50),
    ]);

    let state = reduce(state, AppAction::RemoveCategory("a".to_string()));
    assert_eq!(state.input.categories.len(), 1);
    assert_eq!(state.input.categories[0].id, "b");

    let state = reduce(state, AppAction::RemoveCategory("b".to_string()));
    assert_eq!(state.input.categories.len(), 1);
}

#[test]
fn navigation_starts_from_today_and_clamps() {
    let state = reduce(
        AppState::default(),
        AppAction::Navigate {
            key: NavKey::Right,
            total_weeks: 4160,
            today_week_index: 100,
        },
    );
    assert_eq!(state.selected_week, Some(101));

    let state = reduce(
        state,
        AppAction::Navigate {
            key: NavKey::Down,
            total_weeks: 4160,
            today_week_index: 100,
        },
    );
    assert_eq!(state.selected_week, Some(153));

    let state = reduce(state, AppAction::SelectWeek(Some(4159)));
    let state = reduce(
        state,
        AppAction::Navigate {
            key: NavKey::Down,
            total_weeks: 4160,
            today_week_index: 100,
        },
    );
    assert_eq!(state.selected_week, Some(4159));
}

#[test]
fn navigation_on_empty_grid_keeps_selection_unset() {
    let state = reduce(
        AppState::default(),
        AppAction::Navigate {
            key: NavKey::Left,
            total_weeks: 0,
            today_week_index: 0,
        },
    );

    assert_eq!(state.selected_week, None);
}

#[test]
fn hydrate_replaces_input_but_keeps_view_state() {
    let state = reduce(AppState::default(), AppAction::SetStep(AppStep::Visualization));
    let state = reduce(state, AppAction::SelectWeek(Some(12)));
    let loaded = AppInputState {
        birth_date: "1990-01-01".to_string(),
        life_expectancy_years: 999,
        categories: vec![Category::new("x", "X", "#123456", 100, 100)],
        color_scheme: ColorScheme::Midnight,
    };

    let state = reduce(state, AppAction::Hydrate(loaded));
    assert_eq!(state.step, AppStep::Visualization);
    assert_eq!(state.selected_week, Some(12));
    assert_eq!(state.input.birth_date, "1990-01-01");
    assert_eq!(state.input.life_expectancy_years, 120);
    assert_eq!(state.input.color_scheme, ColorScheme::Midnight);
}

#[test]
fn reduce_is_deterministic_and_reset_restores_defaults() {
    let action = AppAction::SetBirthDate("1975-03-09".to_string());
    let first = reduce(AppState::default(), action.clone());
    let second = reduce(AppState::default(), action);
    assert_eq!(first, second);

    let hovered = reduce(first, AppAction::SetHoveredWeek(Some(4)));
    assert_eq!(hovered.hovered_week, Some(4));
    assert_eq!(reduce(hovered, AppAction::Reset), AppState::default());
}

#[test]
fn category_percents_are_clamped_on_update_and_hydrate() {
    let state = state_with(vec![
        Category::new("a", "Work", "#111111", 50, 50),
        Category::new("b", "Play", "#222222", 50, 50),
    ]);
    let state = reduce(
        state,
        AppAction::UpdateCategory {
            id: "a".to_string(),
            patch: CategoryPatch {
                past_percent: Some(u32::MAX),
                future_percent: Some(101),
                ..CategoryPatch::default()
            },
        },
    );
    assert_eq!(state.input.categories[0].past_percent, 100);
    assert_eq!(state.input.categories[0].future_percent, 100);
    assert_eq!(
        memento_core::model::category::percent_totals(&state.input.categories),
        (150, 150)
    );

    let loaded = AppInputState {
        categories: vec![Category::new("x", "X", "#123456", u32::MAX, 7)],
        ..AppInputState::default()
    };
    let state = reduce(state, AppAction::Hydrate(loaded));
    assert_eq!(state.input.categories[0].past_percent, 100);
    assert_eq!(state.input.categories[0].future_percent, 7);
}
