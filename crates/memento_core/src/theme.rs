//! Color values and named theme palettes.
//!
//! # Responsibility
//! - Parse `#RRGGBB` strings into RGBA values for the renderer.
//! - Provide the fixed palette behind each `ColorScheme`.

use crate::model::input::ColorScheme;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Same color with alpha replaced by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self {
            a: (alpha * 255.0).round() as u8,
            ..self
        }
    }

    /// Source-over composite of `self` onto `background`.
    pub fn blend_over(self, background: Rgba) -> Rgba {
        let src_a = u32::from(self.a);
        if src_a == 0xFF {
            return self;
        }
        if src_a == 0 {
            return background;
        }
        let dst_a = u32::from(background.a) * (0xFF - src_a) / 0xFF;
        let out_a = src_a + dst_a;
        let channel = |src: u8, dst: u8| -> u8 {
            ((u32::from(src) * src_a + u32::from(dst) * dst_a + out_a / 2) / out_a) as u8
        };
        Rgba {
            r: channel(self.r, background.r),
            g: channel(self.g, background.g),
            b: channel(self.b, background.b),
            a: out_a as u8,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Error for color strings that are not `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl Display for ColorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "color must be #RRGGBB, got `{}`", self.0)
    }
}

impl Error for ColorParseError {}

/// Parses `#RRGGBB` (leading `#` optional) into an opaque color.
pub fn parse_hex_color(value: &str) -> Result<Rgba, ColorParseError> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(ColorParseError(value.to_string()));
    }
    let packed = u32::from_str_radix(hex, 16).map_err(|_| ColorParseError(value.to_string()))?;
    Ok(Rgba::opaque(
        (packed >> 16) as u8,
        (packed >> 8) as u8,
        packed as u8,
    ))
}

/// Fixed colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub bg_primary: Rgba,
    pub bg_surface: Rgba,
    pub text_primary: Rgba,
    pub text_muted: Rgba,
    pub grid_empty: Rgba,
    pub accent: Rgba,
}

const OBSIDIAN: ThemePalette = ThemePalette {
    bg_primary: Rgba::opaque(0x0D, 0x0D, 0x0D),
    bg_surface: Rgba::opaque(0x1A, 0x1A, 0x1A),
    text_primary: Rgba::opaque(0xE8, 0xE8, 0xE8),
    text_muted: Rgba::opaque(0x66, 0x66, 0x66),
    grid_empty: Rgba::opaque(0x1F, 0x1F, 0x1F),
    accent: Rgba::opaque(0xFF, 0x6B, 0x35),
};

const PAPER: ThemePalette = ThemePalette {
    bg_primary: Rgba::opaque(0xF5, 0xF0, 0xEB),
    bg_surface: Rgba::opaque(0xFF, 0xFF, 0xFF),
    text_primary: Rgba::opaque(0x2C, 0x2C, 0x2C),
    text_muted: Rgba::opaque(0x77, 0x77, 0x77),
    grid_empty: Rgba::opaque(0xE8, 0xE3, 0xDE),
    accent: Rgba::opaque(0xD4, 0x42, 0x1E),
};

const MIDNIGHT: ThemePalette = ThemePalette {
    bg_primary: Rgba::opaque(0x0A, 0x0E, 0x1A),
    bg_surface: Rgba::opaque(0x11, 0x18, 0x27),
    text_primary: Rgba::opaque(0xD1, 0xD5, 0xDB),
    text_muted: Rgba::opaque(0x6B, 0x72, 0x80),
    grid_empty: Rgba::opaque(0x15, 0x1C, 0x2E),
    accent: Rgba::opaque(0x60, 0xA5, 0xFA),
};

impl ThemePalette {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Obsidian => OBSIDIAN,
            ColorScheme::Paper => PAPER,
            ColorScheme::Midnight => MIDNIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_hex_color, ColorParseError, Rgba, ThemePalette};
    use crate::model::input::ColorScheme;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex_color("#4A90D9").unwrap(), Rgba::opaque(0x4A, 0x90, 0xD9));
        assert_eq!(parse_hex_color("ff6b35").unwrap(), Rgba::opaque(0xFF, 0x6B, 0x35));
    }

    #[test]
    fn rejects_short_and_non_hex_colors() {
        assert_eq!(
            parse_hex_color("#fff").unwrap_err(),
            ColorParseError("#fff".to_string())
        );
        assert!(parse_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn blend_over_mixes_by_alpha() {
        let white = Rgba::WHITE.with_alpha(0.5);
        let blended = white.blend_over(Rgba::opaque(0, 0, 0));
        assert_eq!(blended.a, 0xFF);
        assert!((127..=129).contains(&blended.r));
        assert_eq!(Rgba::TRANSPARENT.blend_over(Rgba::WHITE), Rgba::WHITE);
    }

    #[test]
    fn each_scheme_has_distinct_accent() {
        let accents = ColorScheme::all().map(|scheme| ThemePalette::for_scheme(scheme).accent);
        assert_ne!(accents[0], accents[1]);
        assert_ne!(accents[1], accents[2]);
    }
}
