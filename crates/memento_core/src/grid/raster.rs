//! In-memory RGBA surface and raster export helpers.

use crate::config::{EXPORT_FILE_PREFIX, EXPORT_TARGET_WIDTH};
use crate::grid::geometry::PixelRect;
use crate::grid::render::Surface;
use crate::theme::Rgba;
use crate::week::format_calendar_date;
use chrono::NaiveDate;

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.offset(x, y)).copied()
    }

    /// Flattens to `[r, g, b, a, ...]` bytes, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|pixel| pixel.to_array()).collect()
    }

    /// Scales by an integer factor with nearest-neighbour sampling.
    ///
    /// The factor is capped so neither scaled side exceeds `u32::MAX`.
    pub fn upscale_nearest(&self, factor: u32) -> RasterSurface {
        let factor = factor
            .min(u32::MAX / self.width.max(1))
            .min(u32::MAX / self.height.max(1))
            .max(1);
        let mut scaled = RasterSurface::new(self.width * factor, self.height * factor);
        for y in 0..scaled.height {
            for x in 0..scaled.width {
                let offset = scaled.offset(x, y);
                scaled.pixels[offset] = self.pixels[self.offset(x / factor, y / factor)];
            }
        }
        scaled
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Visits every in-bounds pixel of `rect`.
    fn for_each_in(&mut self, rect: PixelRect, mut paint: impl FnMut(&mut Rgba)) {
        let x_end = rect.x.saturating_add(rect.width).min(self.width);
        let y_end = rect.y.saturating_add(rect.height).min(self.height);
        for y in rect.y.min(y_end)..y_end {
            for x in rect.x.min(x_end)..x_end {
                let offset = self.offset(x, y);
                paint(&mut self.pixels[offset]);
            }
        }
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = RasterSurface::new(width, height);
    }

    fn clear_rect(&mut self, rect: PixelRect) {
        self.for_each_in(rect, |pixel| *pixel = Rgba::TRANSPARENT);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.for_each_in(rect, |pixel| *pixel = color.blend_over(*pixel));
    }

    fn stroke_rect(&mut self, rect: PixelRect, line_width: u32, color: Rgba) {
        let band_x = line_width.min(rect.width);
        let band_y = line_width.min(rect.height);
        let right = rect.x.saturating_add(rect.width - band_x);
        let bottom = rect.y.saturating_add(rect.height - band_y);
        let bands = [
            PixelRect::new(rect.x, rect.y, rect.width, band_y),
            PixelRect::new(rect.x, bottom, rect.width, band_y),
            PixelRect::new(rect.x, rect.y, band_x, rect.height),
            PixelRect::new(right, rect.y, band_x, rect.height),
        ];
        for band in bands {
            self.fill_rect(band, color);
        }
    }
}

/// Integer upscale factor bringing a grid close to the export width.
pub fn export_scale(layout_width: u32) -> u32 {
    if layout_width == 0 {
        return 1;
    }
    (EXPORT_TARGET_WIDTH / layout_width).max(1)
}

/// Export file name stamped with a calendar day.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.png", format_calendar_date(date))
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, export_scale, RasterSurface};
    use crate::grid::geometry::PixelRect;
    use crate::grid::render::Surface;
    use crate::theme::Rgba;
    use chrono::NaiveDate;

    #[test]
    fn stroke_leaves_cell_center_untouched() {
        let red = Rgba::opaque(0xFF, 0, 0);
        let mut surface = RasterSurface::new(10, 10);
        surface.fill_rect(PixelRect::new(0, 0, 10, 10), red);
        surface.stroke_rect(PixelRect::new(0, 0, 10, 10), 2, Rgba::WHITE);

        assert_eq!(surface.pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(1, 5), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(9, 9), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(2, 2), Some(red));
        assert_eq!(surface.pixel(7, 7), Some(red));
    }

    #[test]
    fn fill_is_clipped_to_bounds() {
        let mut surface = RasterSurface::new(4, 4);
        surface.fill_rect(PixelRect::new(2, 2, 10, 10), Rgba::WHITE);
        assert_eq!(surface.pixel(3, 3), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(1, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(4, 4), None);
    }

    #[test]
    fn upscale_repeats_pixels() {
        let mut surface = RasterSurface::new(2, 1);
        surface.fill_rect(PixelRect::new(1, 0, 1, 1), Rgba::WHITE);
        let scaled = surface.upscale_nearest(3);
        assert_eq!((scaled.width(), scaled.height()), (6, 3));
        assert_eq!(scaled.pixel(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(scaled.pixel(3, 0), Some(Rgba::WHITE));
        assert_eq!(scaled.to_rgba_bytes().len(), 6 * 3 * 4);
    }

    #[test]
    fn export_helpers_follow_naming_and_scale_rules() {
        assert_eq!(export_scale(622), 6);
        assert_eq!(export_scale(5000), 1);
        assert_eq!(export_scale(0), 1);
        let date = NaiveDate::from_ymd_opt(2026, 2, 11).unwrap();
        assert_eq!(export_file_name(date), "memento-mori-2026-02-11.png");
    }
}
