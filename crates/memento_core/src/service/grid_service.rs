//! Visualization use-cases: input state to painted grid.
//!
//! # Responsibility
//! - Run the pipeline week math -> allocation -> geometry -> renderer.
//! - Resolve theme and category colors for the renderer.
//!
//! # Invariants
//! - Snapshots are rebuilt from inputs; nothing is cached between calls.

use crate::allocation::build_all_week_category_indices;
use crate::config::{DEFAULT_CELL_GAP, DEFAULT_CELL_SIZE};
use crate::grid::geometry::{get_grid_layout, GridLayout};
use crate::grid::raster::{export_scale, RasterSurface};
use crate::grid::render::{
    current_week_color, draw_grid_to_context, CategoryFill, GridRenderOptions, Surface,
};
use crate::model::input::AppInputState;
use crate::model::metrics::DerivedMetrics;
use crate::theme::{parse_hex_color, Rgba, ThemePalette};
use crate::week::{compute_derived_metrics, WeekMathError};
use chrono::{DateTime, Utc};
use log::debug;

/// Everything needed to paint one grid, derived from input state.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeGridSnapshot {
    pub metrics: DerivedMetrics,
    /// One category index per week; empty when no categories exist.
    pub assignment: Vec<usize>,
    /// Resolved category colors, index-aligned with input categories.
    pub category_colors: Vec<Rgba>,
    pub layout: GridLayout,
    pub palette: ThemePalette,
}

/// Per-frame presentation flags supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameState {
    pub selected_week: Option<u32>,
    pub blink_on: bool,
    pub reduced_motion: bool,
    /// Color cells by category instead of lived/empty.
    pub show_categories: bool,
}

/// Grid pipeline with a fixed cell size and gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeGridService {
    cell_size: u32,
    gap: u32,
}

impl Default for LifeGridService {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, DEFAULT_CELL_GAP)
    }
}

impl LifeGridService {
    pub fn new(cell_size: u32, gap: u32) -> Self {
        Self { cell_size, gap }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    /// Derives metrics, allocation and layout for `input` at `now`.
    ///
    /// # Errors
    /// Returns the week-math error when the birth date does not parse.
    pub fn snapshot(
        &self,
        input: &AppInputState,
        now: DateTime<Utc>,
    ) -> Result<LifeGridSnapshot, WeekMathError> {
        let metrics =
            compute_derived_metrics(&input.birth_date, input.life_expectancy_years, now)?;
        let assignment = build_all_week_category_indices(
            metrics.weeks_lived,
            metrics.total_weeks,
            &input.categories,
        );
        let palette = ThemePalette::for_scheme(input.color_scheme);
        let category_colors = input
            .categories
            .iter()
            .map(|category| {
                parse_hex_color(&category.color).unwrap_or_else(|err| {
                    debug!("event=category_color module=service status=fallback error={err}");
                    palette.text_muted
                })
            })
            .collect();

        debug!(
            "event=grid_snapshot module=service status=ok total_weeks={} weeks_lived={} categories={}",
            metrics.total_weeks,
            metrics.weeks_lived,
            input.categories.len()
        );

        Ok(LifeGridSnapshot {
            layout: get_grid_layout(metrics.total_weeks, self.cell_size, self.gap),
            metrics,
            assignment,
            category_colors,
            palette,
        })
    }

    /// Paints one frame of `snapshot` onto `surface`.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        snapshot: &LifeGridSnapshot,
        frame: FrameState,
    ) -> GridLayout {
        let palette = &snapshot.palette;
        let category_fill = (frame.show_categories && !snapshot.assignment.is_empty()).then(|| {
            CategoryFill {
                indices: &snapshot.assignment,
                colors: &snapshot.category_colors,
            }
        });

        let options = GridRenderOptions {
            total_weeks: snapshot.metrics.total_weeks,
            weeks_lived: snapshot.metrics.weeks_lived,
            selected_week: frame.selected_week,
            cell_size: self.cell_size,
            gap: self.gap,
            lived_color: palette.text_muted,
            empty_color: palette.grid_empty,
            current_color: current_week_color(
                palette.text_primary,
                palette.text_muted,
                frame.blink_on,
                frame.reduced_motion,
            ),
            category_fill,
        };
        draw_grid_to_context(surface, &options)
    }

    /// Renders a still frame and upscales it for download.
    pub fn export(&self, snapshot: &LifeGridSnapshot, frame: FrameState) -> RasterSurface {
        let mut surface = RasterSurface::default();
        let still = FrameState {
            blink_on: true,
            ..frame
        };
        let layout = self.render(&mut surface, snapshot, still);
        surface.upscale_nearest(export_scale(layout.width))
    }
}
