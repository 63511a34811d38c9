//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Convert between primitive transfer structs and core domain types.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported inside response envelopes, never thrown.
//! - "Now" is always taken from the UTC clock at call time.

use chrono::Utc;
use memento_core::config::clamp_life_expectancy;
use memento_core::db::open_db;
use memento_core::grid::{describe_week, export_file_name, step_selection, NavKey};
use memento_core::{
    core_version as core_version_inner, decode_state, encode_state, generate_reflection_insights,
    get_grid_layout, get_week_date_range, get_week_index_at_point,
    init_logging as init_logging_inner, ping as ping_inner, AppInputState, Category, ColorScheme,
    DerivedMetrics, FrameState, LifeGridService, RasterSurface, SqliteStateStore, StateService,
    Surface,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const STATE_DB_FILE_NAME: &str = "memento_state.sqlite3";
static STATE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Category as transferred over FFI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    /// `#RRGGBB`.
    pub color: String,
    pub past_percent: u32,
    pub future_percent: u32,
}

/// Editable app input as transferred over FFI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputStateDto {
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    pub life_expectancy_years: u32,
    pub categories: Vec<CategoryDto>,
    /// `obsidian|paper|midnight`.
    pub color_scheme: String,
}

impl InputStateDto {
    /// Converts to core state, normalizing host numbers into their bounds.
    fn into_core(self) -> Result<AppInputState, String> {
        let color_scheme = self.color_scheme.parse::<ColorScheme>()?;
        Ok(AppInputState {
            birth_date: self.birth_date,
            life_expectancy_years: clamp_life_expectancy(self.life_expectancy_years),
            categories: self
                .categories
                .into_iter()
                .map(|category| {
                    Category::new(
                        category.id,
                        category.name,
                        category.color,
                        normalize_percent(category.past_percent),
                        normalize_percent(category.future_percent),
                    )
                })
                .collect(),
            color_scheme,
        })
    }
}

impl From<AppInputState> for InputStateDto {
    fn from(value: AppInputState) -> Self {
        Self {
            birth_date: value.birth_date,
            life_expectancy_years: value.life_expectancy_years,
            categories: value
                .categories
                .into_iter()
                .map(|category| CategoryDto {
                    id: category.id,
                    name: category.name,
                    color: category.color,
                    past_percent: category.past_percent,
                    future_percent: category.future_percent,
                })
                .collect(),
            color_scheme: value.color_scheme.as_str().to_string(),
        }
    }
}

/// Lifespan summary in weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeMetrics {
    pub total_weeks: u32,
    pub weeks_lived: u32,
    pub weeks_remaining: u32,
    pub percent_lived: f64,
    pub today_week_index: u32,
    pub grid_rows: u32,
    pub grid_cols: u32,
}

impl From<DerivedMetrics> for LifeMetrics {
    fn from(value: DerivedMetrics) -> Self {
        Self {
            total_weeks: value.total_weeks,
            weeks_lived: value.weeks_lived,
            weeks_remaining: value.weeks_remaining,
            percent_lived: value.percent_lived,
            today_week_index: value.today_week_index,
            grid_rows: value.grid_rows,
            grid_cols: value.grid_cols,
        }
    }
}

/// Metrics response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeMetricsResponse {
    pub ok: bool,
    /// Present only when `ok`.
    pub metrics: Option<LifeMetrics>,
    pub message: String,
}

/// Week range response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRangeResponse {
    pub ok: bool,
    /// `YYYY-MM-DD`; empty on failure.
    pub start: String,
    /// `YYYY-MM-DD`; empty on failure.
    pub end: String,
    /// Screen-reader label on success, error message on failure.
    pub message: String,
}

/// Grid pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayoutView {
    pub width: u32,
    pub height: u32,
    pub rows: u32,
}

/// Generic action response envelope for state persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateActionResponse {
    pub ok: bool,
    pub message: String,
}

impl StateActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Load response envelope; `state` is `None` when nothing usable is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLoadResponse {
    pub ok: bool,
    pub state: Option<InputStateDto>,
    pub message: String,
}

/// Rendered grid as row-major RGBA8 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResponse {
    pub ok: bool,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    /// Suggested download name; set only for export renders.
    pub file_name: Option<String>,
    pub message: String,
}

impl RenderResponse {
    fn from_surface(surface: &RasterSurface, file_name: Option<String>) -> Self {
        Self {
            ok: true,
            width: surface.width(),
            height: surface.height(),
            pixels: surface.to_rgba_bytes(),
            file_name,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            file_name: None,
            message: message.into(),
        }
    }
}

/// Insights response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsResponse {
    pub ok: bool,
    pub lines: Vec<String>,
    pub message: String,
}

/// Derives week metrics for a birth date as of today (UTC).
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics; malformed dates return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn life_metrics(birth_date: String, life_expectancy_years: u32) -> LifeMetricsResponse {
    let years = clamp_life_expectancy(life_expectancy_years);
    match memento_core::compute_derived_metrics(&birth_date, years, Utc::now()) {
        Ok(metrics) => LifeMetricsResponse {
            ok: true,
            metrics: Some(metrics.into()),
            message: String::new(),
        },
        Err(err) => LifeMetricsResponse {
            ok: false,
            metrics: None,
            message: format!("life_metrics failed: {err}"),
        },
    }
}

/// Calendar span of one week cell plus its accessibility label.
#[flutter_rust_bridge::frb(sync)]
pub fn week_date_range(birth_date: String, week_index: u32, weeks_lived: u32) -> WeekRangeResponse {
    let described = get_week_date_range(&birth_date, week_index).and_then(|range| {
        describe_week(&birth_date, week_index, weeks_lived).map(|label| (range, label))
    });
    match described {
        Ok((range, label)) => WeekRangeResponse {
            ok: true,
            start: range.start_iso(),
            end: range.end_iso(),
            message: label,
        },
        Err(err) => WeekRangeResponse {
            ok: false,
            start: String::new(),
            end: String::new(),
            message: format!("week_date_range failed: {err}"),
        },
    }
}

/// Pixel size of a grid holding `total_weeks` cells.
#[flutter_rust_bridge::frb(sync)]
pub fn grid_layout(total_weeks: u32, cell_size: u32, gap: u32) -> GridLayoutView {
    let layout = get_grid_layout(total_weeks, cell_size, gap);
    GridLayoutView {
        width: layout.width,
        height: layout.height,
        rows: layout.rows,
    }
}

/// Hit-tests a pointer position in grid-local pixels.
#[flutter_rust_bridge::frb(sync)]
pub fn week_at_point(x: f64, y: f64, total_weeks: u32, cell_size: u32, gap: u32) -> Option<u32> {
    get_week_index_at_point(x, y, total_weeks, cell_size, gap)
}

/// Applies one arrow key press to the selection.
///
/// Input semantics:
/// - `current`: selected week, or `None` to start from `today_week_index`.
/// - `key`: `ArrowLeft|ArrowRight|ArrowUp|ArrowDown`; other keys keep `current`.
#[flutter_rust_bridge::frb(sync)]
pub fn navigate_week(
    current: Option<u32>,
    key: String,
    total_weeks: u32,
    today_week_index: u32,
) -> Option<u32> {
    let Some(key) = NavKey::from_key_name(&key) else {
        return current;
    };
    step_selection(current.unwrap_or(today_week_index), key, total_weeks).or(current)
}

/// Encodes input state as a `v2.` share token.
///
/// Returns an empty string when the color scheme is not recognized.
#[flutter_rust_bridge::frb(sync)]
pub fn share_token_encode(state: InputStateDto) -> String {
    match state.into_core() {
        Ok(state) => encode_state(&state),
        Err(err) => {
            log::warn!("event=share_encode module=ffi status=error error={err}");
            String::new()
        }
    }
}

/// Decodes a share token or URL fragment; `None` when unusable.
#[flutter_rust_bridge::frb(sync)]
pub fn share_token_decode(token: String) -> Option<InputStateDto> {
    decode_state(&token).map(InputStateDto::from)
}

/// Persists input state to the local state database.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn state_save(state: InputStateDto) -> StateActionResponse {
    let state = match state.into_core() {
        Ok(state) => state,
        Err(err) => return StateActionResponse::failure(format!("state_save failed: {err}")),
    };
    match with_state_service(|service| service.save_state(&state).map_err(|err| err.to_string()))
    {
        Ok(()) => StateActionResponse::success("State saved."),
        Err(err) => StateActionResponse::failure(format!("state_save failed: {err}")),
    }
}

/// Loads persisted input state, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn state_load() -> StateLoadResponse {
    match with_state_service(|service| service.load_state().map_err(|err| err.to_string())) {
        Ok(state) => StateLoadResponse {
            ok: true,
            message: if state.is_some() {
                "State loaded.".to_string()
            } else {
                "No saved state.".to_string()
            },
            state: state.map(InputStateDto::from),
        },
        Err(err) => StateLoadResponse {
            ok: false,
            state: None,
            message: format!("state_load failed: {err}"),
        },
    }
}

/// Deletes persisted input state.
#[flutter_rust_bridge::frb(sync)]
pub fn state_clear() -> StateActionResponse {
    match with_state_service(|service| service.clear_state().map_err(|err| err.to_string())) {
        Ok(true) => StateActionResponse::success("State cleared."),
        Ok(false) => StateActionResponse::success("No saved state."),
        Err(err) => StateActionResponse::failure(format!("state_clear failed: {err}")),
    }
}

/// Paints the grid for `state` into RGBA bytes.
///
/// Input semantics:
/// - `blink_on` / `reduced_motion`: current-week blink phase flags.
/// - `for_export`: render a still frame upscaled toward the export width and
///   fill `file_name`.
///
/// # FFI contract
/// - Sync call; export renders allocate tens of megabytes.
/// - Never panics; malformed input returns `ok=false` and no pixels.
#[flutter_rust_bridge::frb(sync)]
pub fn render_grid_rgba(
    state: InputStateDto,
    selected_week: Option<u32>,
    show_categories: bool,
    blink_on: bool,
    reduced_motion: bool,
    for_export: bool,
) -> RenderResponse {
    let input = match state.into_core() {
        Ok(input) => input,
        Err(err) => return RenderResponse::failure(format!("render_grid_rgba failed: {err}")),
    };
    let now = Utc::now();
    let service = LifeGridService::default();
    let snapshot = match service.snapshot(&input, now) {
        Ok(snapshot) => snapshot,
        Err(err) => return RenderResponse::failure(format!("render_grid_rgba failed: {err}")),
    };
    let frame = FrameState {
        selected_week,
        blink_on,
        reduced_motion,
        show_categories,
    };

    if for_export {
        let exported = service.export(&snapshot, frame);
        return RenderResponse::from_surface(
            &exported,
            Some(export_file_name(now.date_naive())),
        );
    }
    let mut surface = RasterSurface::default();
    service.render(&mut surface, &snapshot, frame);
    RenderResponse::from_surface(&surface, None)
}

/// Five reflection prompts for the summary panel.
#[flutter_rust_bridge::frb(sync)]
pub fn reflection_insights(state: InputStateDto) -> InsightsResponse {
    let insights = state.into_core().and_then(|input| {
        memento_core::compute_derived_metrics(
            &input.birth_date,
            input.life_expectancy_years,
            Utc::now(),
        )
        .map(|metrics| generate_reflection_insights(&metrics, &input.categories))
        .map_err(|err| err.to_string())
    });
    match insights {
        Ok(lines) => InsightsResponse {
            ok: true,
            lines,
            message: String::new(),
        },
        Err(err) => InsightsResponse {
            ok: false,
            lines: Vec::new(),
            message: format!("reflection_insights failed: {err}"),
        },
    }
}

fn normalize_percent(percent: u32) -> u32 {
    percent.min(100)
}

fn resolve_state_db_path() -> PathBuf {
    STATE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MEMENTO_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STATE_DB_FILE_NAME)
        })
        .clone()
}

fn with_state_service<T>(
    f: impl FnOnce(&StateService<SqliteStateStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_state_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("state DB open failed: {err}"))?;
    let service = StateService::new(SqliteStateStore::new(&conn));
    f(&service)
}
