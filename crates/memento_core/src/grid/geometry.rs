//! Week index to pixel mapping and its inverse.
//!
//! # Invariants
//! - The grid is always `GRID_COLUMNS` wide; rows grow with total weeks.
//! - A cell at `(row, col)` starts at `(col * unit, row * unit)` where
//!   `unit = cell_size + gap`.
//! - Gap pixels never resolve to a week.

use crate::config::GRID_COLUMNS;
use serde::{Deserialize, Serialize};

/// Pixel size of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub width: u32,
    pub height: u32,
    pub rows: u32,
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && py >= self.y
            && u64::from(px) < u64::from(self.x) + u64::from(self.width)
            && u64::from(py) < u64::from(self.y) + u64::from(self.height)
    }
}

/// Computes the grid's pixel size.
///
/// An empty grid (`total_weeks == 0`) has zero height rather than `-gap`.
/// Dimensions saturate at `u32::MAX` instead of wrapping.
pub fn get_grid_layout(total_weeks: u32, cell_size: u32, gap: u32) -> GridLayout {
    let unit = cell_size.saturating_add(gap);
    let rows = total_weeks.div_ceil(GRID_COLUMNS);
    GridLayout {
        width: GRID_COLUMNS.saturating_mul(unit).saturating_sub(gap),
        height: rows.saturating_mul(unit).saturating_sub(gap),
        rows,
    }
}

/// Returns `(row, col)` for a week index.
pub fn cell_position(week_index: u32) -> (u32, u32) {
    (week_index / GRID_COLUMNS, week_index % GRID_COLUMNS)
}

/// Returns the pixel rectangle covered by one week cell.
pub fn cell_rect(week_index: u32, cell_size: u32, gap: u32) -> PixelRect {
    let (row, col) = cell_position(week_index);
    let unit = cell_size.saturating_add(gap);
    PixelRect::new(
        col.saturating_mul(unit),
        row.saturating_mul(unit),
        cell_size,
        cell_size,
    )
}

/// Resolves a pointer position to the week under it.
///
/// Returns `None` for points left of or beyond the 52 columns, above the
/// first row, inside the gap between cells, or past the last week.
pub fn get_week_index_at_point(
    x: f64,
    y: f64,
    total_weeks: u32,
    cell_size: u32,
    gap: u32,
) -> Option<u32> {
    let unit = f64::from(cell_size) + f64::from(gap);
    if unit <= 0.0 || !x.is_finite() || !y.is_finite() {
        return None;
    }

    let col = (x / unit).floor();
    let row = (y / unit).floor();
    if col < 0.0 || col >= f64::from(GRID_COLUMNS) || row < 0.0 {
        return None;
    }

    let size = f64::from(cell_size);
    if x.rem_euclid(unit) > size || y.rem_euclid(unit) > size {
        return None;
    }

    let index = row * f64::from(GRID_COLUMNS) + col;
    if index >= f64::from(total_weeks) {
        return None;
    }
    Some(index as u32)
}

#[cfg(test)]
mod tests {
    use super::{cell_rect, get_grid_layout, get_week_index_at_point, PixelRect};

    #[test]
    fn empty_grid_has_zero_height() {
        let layout = get_grid_layout(0, 10, 2);
        assert_eq!(layout.rows, 0);
        assert_eq!(layout.height, 0);
        assert_eq!(layout.width, 622);
    }

    #[test]
    fn partial_last_row_counts_as_a_row() {
        assert_eq!(get_grid_layout(53, 10, 2).rows, 2);
    }

    #[test]
    fn cell_rect_and_hit_test_agree() {
        for index in [0, 1, 51, 52, 53, 4159] {
            let rect = cell_rect(index, 10, 2);
            let center_x = f64::from(rect.x) + 5.0;
            let center_y = f64::from(rect.y) + 5.0;
            assert_eq!(
                get_week_index_at_point(center_x, center_y, 4160, 10, 2),
                Some(index)
            );
        }
    }

    #[test]
    fn degenerate_unit_never_hits() {
        assert_eq!(get_week_index_at_point(0.0, 0.0, 10, 0, 0), None);
        assert_eq!(get_week_index_at_point(f64::NAN, 0.0, 10, 10, 2), None);
    }

    #[test]
    fn oversized_cells_saturate_instead_of_overflowing() {
        let layout = get_grid_layout(4160, 100_000_000, 2);
        assert_eq!(layout.rows, 80);
        assert_eq!(layout.width, u32::MAX - 2);
        assert_eq!(layout.height, u32::MAX - 2);

        let rect = cell_rect(4159, u32::MAX, u32::MAX);
        assert_eq!((rect.x, rect.y), (u32::MAX, u32::MAX));
    }

    #[test]
    fn hit_test_accepts_extreme_cell_sizes() {
        assert_eq!(get_week_index_at_point(1.0, 1.0, 4160, u32::MAX, 2), Some(0));
        assert_eq!(get_week_index_at_point(1.0, 1.0, 4160, u32::MAX, u32::MAX), Some(0));
    }

    #[test]
    fn pixel_rect_contains_is_half_open() {
        let rect = PixelRect::new(2, 2, 3, 3);
        assert!(rect.contains(2, 2));
        assert!(rect.contains(4, 4));
        assert!(!rect.contains(5, 4));
    }
}
