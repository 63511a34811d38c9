//! Compile-time configuration shared by all core modules.
//!
//! # Responsibility
//! - Own the grid shape, life-expectancy bounds and persistence key.
//! - Keep every tunable in one place so FFI/CLI hosts read the same values.
//!
//! # Invariants
//! - `LIFE_EXPECTANCY_MIN <= LIFE_EXPECTANCY_DEFAULT <= LIFE_EXPECTANCY_MAX`.
//! - `GRID_COLUMNS` is the number of weeks drawn per grid row (one "year").

/// Weeks per grid row. Also the weeks-per-year factor used by `WeekMath`.
pub const GRID_COLUMNS: u32 = 52;

/// Lower bound accepted for life expectancy, in years.
pub const LIFE_EXPECTANCY_MIN: u32 = 40;
/// Upper bound accepted for life expectancy, in years.
pub const LIFE_EXPECTANCY_MAX: u32 = 120;
/// Life expectancy used when nothing else is known.
pub const LIFE_EXPECTANCY_DEFAULT: u32 = 80;

/// Local persistence key holding the encoded state token.
pub const STORAGE_KEY: &str = "memento-mori-state";

/// Seed for the past-segment shuffle.
pub const PAST_SEGMENT_SEED: u32 = 0x9E37_79B1;
/// Seed for the future-segment shuffle. Must differ from `PAST_SEGMENT_SEED`.
pub const FUTURE_SEGMENT_SEED: u32 = 0x85EB_CA77;

/// Default on-screen cell edge, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 10;
/// Default gap between cells, in pixels.
pub const DEFAULT_CELL_GAP: u32 = 2;

/// Target long edge for raster exports, in pixels.
pub const EXPORT_TARGET_WIDTH: u32 = 4096;
/// File name prefix used for raster exports.
pub const EXPORT_FILE_PREFIX: &str = "memento-mori";

/// Clamps a life-expectancy value into the supported range.
pub fn clamp_life_expectancy(years: u32) -> u32 {
    years.clamp(LIFE_EXPECTANCY_MIN, LIFE_EXPECTANCY_MAX)
}
