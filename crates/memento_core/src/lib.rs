//! Core domain logic for Memento, a life-in-weeks grid.
//! This crate is the single source of truth for week math, allocation,
//! grid geometry and the persisted state format.

pub mod allocation;
pub mod codec;
pub mod config;
pub mod db;
pub mod grid;
pub mod insights;
pub mod logging;
pub mod model;
pub mod service;
pub mod state;
pub mod store;
pub mod theme;
pub mod week;

pub use allocation::{build_all_week_category_indices, build_segment_category_indices};
pub use codec::{decode_state, encode_state, try_decode_state, StateCodecError};
pub use grid::{
    draw_grid_to_context, get_grid_layout, get_week_index_at_point, GridLayout,
    GridRenderOptions, RasterSurface, Surface,
};
pub use insights::generate_reflection_insights;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryValidationError};
pub use model::input::{AppInputState, ColorScheme};
pub use model::metrics::DerivedMetrics;
pub use service::grid_service::{FrameState, LifeGridService, LifeGridSnapshot};
pub use service::state_service::StateService;
pub use state::{reduce, AppAction, AppState, AppStep, CategoryPatch};
pub use store::{MemoryStateStore, SqliteStateStore, StateStore, StoreError, StoreResult};
pub use theme::{parse_hex_color, Rgba, ThemePalette};
pub use week::{
    compute_derived_metrics, get_week_date_range, parse_calendar_date, WeekDateRange,
    WeekMathError,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
