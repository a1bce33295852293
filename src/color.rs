// Color types for the canvas layers. Colors are handed to the 2D context as
// CSS strings, so everything here ends in `to_css()`.

use serde::Deserialize;

/// An opaque RGB color. Config accepts either `{ "r", "g", "b" }` or a
/// packed `0xRRGGBB` number.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Packed(u32),
    Channels { r: u8, g: u8, b: u8 },
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Packed(num) => Color::from_rgb_u32(num),
            ColorRepr::Channels { r, g, b } => Color { r, g, b },
        }
    }
}

impl Color {
    pub const TEAL: Color = Color {
        r: 42,
        g: 250,
        b: 223,
    };

    /// Unpacks `0xRRGGBB`; bits above the low 24 are ignored.
    pub fn from_rgb_u32(num: u32) -> Color {
        Color {
            r: (num >> 16) as u8,
            g: (num >> 8) as u8,
            b: num as u8,
        }
    }
}

/// A fill or stroke style with its alpha already applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Paint {
    Rgba { color: Color, alpha: f64 },
    Hsla { hue: f64, alpha: f64 },
}

impl Paint {
    // Rainbow strokes share saturation and lightness, only the hue moves
    const SATURATION: u32 = 70;
    const LIGHTNESS: u32 = 60;

    pub fn alpha(&self) -> f64 {
        match *self {
            Paint::Rgba { alpha, .. } | Paint::Hsla { alpha, .. } => alpha,
        }
    }

    pub fn to_css(&self) -> String {
        match *self {
            Paint::Rgba { color, alpha } => {
                format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, alpha)
            }
            Paint::Hsla { hue, alpha } => format!(
                "hsla({}, {}%, {}%, {})",
                hue,
                Paint::SATURATION,
                Paint::LIGHTNESS,
                alpha
            ),
        }
    }
}

/// Hue that walks around the color wheel over time, offset per point.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HueCycle {
    /// Degrees between consecutive point indices.
    pub index_step: f64,
    /// Degrees per elapsed millisecond.
    pub rate: f64,
}

impl Default for HueCycle {
    fn default() -> Self {
        HueCycle {
            index_step: 1.0,
            rate: 0.01,
        }
    }
}

impl HueCycle {
    pub fn hue(&self, index: usize, elapsed_ms: f64) -> f64 {
        (index as f64 * self.index_step + elapsed_ms * self.rate).rem_euclid(360.0)
    }
}

/// Picks the paint for a point or connection: the base color normally,
/// the cycling hue in rainbow mode.
pub fn paint_for(
    base: Color,
    hues: &HueCycle,
    rainbow: bool,
    index: usize,
    elapsed_ms: f64,
    alpha: f64,
) -> Paint {
    if rainbow {
        Paint::Hsla {
            hue: hues.hue(index, elapsed_ms),
            alpha,
        }
    } else {
        Paint::Rgba { color: base, alpha }
    }
}
