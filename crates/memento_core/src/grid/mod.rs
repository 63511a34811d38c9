//! Grid geometry, navigation and rendering.
//!
//! # Responsibility
//! - Map week indices to pixel rectangles and back (`geometry`).
//! - Translate keyboard input into selection moves (`navigation`).
//! - Paint the grid onto any `Surface` (`render`), including an in-memory
//!   RGBA raster used for tests and export (`raster`).
//!
//! # Invariants
//! - Everything upstream of `Surface` is display-agnostic.

pub mod geometry;
pub mod navigation;
pub mod raster;
pub mod render;

pub use geometry::{
    cell_position, cell_rect, get_grid_layout, get_week_index_at_point, GridLayout, PixelRect,
};
pub use navigation::{describe_week, step_selection, NavKey, WeekStatus};
pub use raster::{export_file_name, export_scale, RasterSurface};
pub use render::{
    current_week_color, draw_grid_to_context, CategoryFill, GridRenderOptions, Surface,
};
