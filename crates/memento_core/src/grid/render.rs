//! Grid painting onto an abstract drawing surface.
//!
//! # Responsibility
//! - Define the minimal `Surface` capability the renderer needs.
//! - Paint week cells from geometry, lived count and optional allocation.
//!
//! # Invariants
//! - Drawing is idempotent: identical options on an untouched surface
//!   produce an identical raster.
//! - The selection outline is drawn inside the cell and never changes the
//!   cell's fill underneath the outline band.

use crate::grid::geometry::{cell_rect, get_grid_layout, GridLayout, PixelRect};
use crate::theme::Rgba;

/// Alpha applied to category colors for weeks not yet lived.
pub const FUTURE_CATEGORY_ALPHA: f32 = 0.35;
/// Width of the selected-week outline, in pixels.
pub const SELECTION_LINE_WIDTH: u32 = 2;

/// Drawing capability consumed by the renderer.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Resizes the surface; contents are discarded.
    fn resize(&mut self, width: u32, height: u32);
    fn clear_rect(&mut self, rect: PixelRect);
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba);
    /// Paints a `line_width` band along the inside edge of `rect`.
    fn stroke_rect(&mut self, rect: PixelRect, line_width: u32, color: Rgba);
}

/// Allocation overlay: one category index per week plus category colors.
#[derive(Debug, Clone, Copy)]
pub struct CategoryFill<'a> {
    pub indices: &'a [usize],
    pub colors: &'a [Rgba],
}

impl CategoryFill<'_> {
    fn color_for(&self, week_index: u32) -> Option<Rgba> {
        let category_index = *self.indices.get(week_index as usize)?;
        self.colors.get(category_index).copied()
    }
}

/// Inputs for one grid paint.
#[derive(Debug, Clone, Copy)]
pub struct GridRenderOptions<'a> {
    pub total_weeks: u32,
    pub weeks_lived: u32,
    pub selected_week: Option<u32>,
    pub cell_size: u32,
    pub gap: u32,
    pub lived_color: Rgba,
    pub empty_color: Rgba,
    /// Highlight for the current week. Blinking is the caller's concern:
    /// it passes a different color on alternate frames.
    pub current_color: Rgba,
    pub category_fill: Option<CategoryFill<'a>>,
}

/// Paints the week grid and returns its layout.
///
/// The surface is resized to the layout when its size differs, then cleared.
pub fn draw_grid_to_context<S: Surface + ?Sized>(
    surface: &mut S,
    options: &GridRenderOptions<'_>,
) -> GridLayout {
    let layout = get_grid_layout(options.total_weeks, options.cell_size, options.gap);
    if surface.width() != layout.width || surface.height() != layout.height {
        surface.resize(layout.width, layout.height);
    }
    surface.clear_rect(PixelRect::new(0, 0, layout.width, layout.height));

    for week_index in 0..options.total_weeks {
        let rect = cell_rect(week_index, options.cell_size, options.gap);
        surface.fill_rect(rect, cell_fill(options, week_index));

        if options.selected_week == Some(week_index) {
            surface.stroke_rect(rect, SELECTION_LINE_WIDTH, Rgba::WHITE);
        }
    }

    layout
}

fn cell_fill(options: &GridRenderOptions<'_>, week_index: u32) -> Rgba {
    if week_index == options.weeks_lived {
        return options.current_color;
    }
    let lived = week_index < options.weeks_lived;
    match options
        .category_fill
        .and_then(|fill| fill.color_for(week_index))
    {
        Some(color) if lived => color,
        Some(color) => color
            .with_alpha(FUTURE_CATEGORY_ALPHA)
            .blend_over(options.empty_color),
        None if lived => options.lived_color,
        None => options.empty_color,
    }
}

/// Current-week highlight for a blink phase.
///
/// With reduced motion the highlight stays on.
pub fn current_week_color(on: Rgba, off: Rgba, blink_on: bool, reduced_motion: bool) -> Rgba {
    if reduced_motion || blink_on {
        on
    } else {
        off
    }
}
