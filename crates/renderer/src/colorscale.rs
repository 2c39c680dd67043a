//! Color scales for overlay rendering.
//!
//! A [`ColorScale`] is one description shared by two renderers: the
//! rasterizer samples it per pixel, the legend renderer emits its stops as an
//! SVG gradient. Keeping a single stop list guarantees the two agree.

use serde::{Deserialize, Serialize};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Hex string for vector output, e.g. "#ff8000".
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)) as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)) as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)) as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)) as u8,
    )
}

/// Color stop at a normalized position in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub position: f32,
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// Named continuous palettes recognized in run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Blue, cyan, green, yellow, red. The classic temperature ramp.
    Jet,
    /// Perceptually uniform dark-purple to yellow ramp.
    Viridis,
}

impl Palette {
    /// Ordered stops of the palette over [0, 1].
    pub fn stops(&self) -> Vec<ColorStop> {
        match self {
            Palette::Jet => vec![
                ColorStop::new(0.0, Color::opaque(0, 0, 255)),
                ColorStop::new(0.25, Color::opaque(0, 255, 255)),
                ColorStop::new(0.5, Color::opaque(0, 128, 0)),
                ColorStop::new(0.75, Color::opaque(255, 255, 0)),
                ColorStop::new(1.0, Color::opaque(255, 0, 0)),
            ],
            Palette::Viridis => vec![
                ColorStop::new(0.0, Color::opaque(0x44, 0x01, 0x54)),
                ColorStop::new(0.2, Color::opaque(0x41, 0x44, 0x87)),
                ColorStop::new(0.4, Color::opaque(0x2a, 0x78, 0x8e)),
                ColorStop::new(0.6, Color::opaque(0x22, 0xa8, 0x84)),
                ColorStop::new(0.8, Color::opaque(0x7a, 0xd1, 0x51)),
                ColorStop::new(1.0, Color::opaque(0xfd, 0xe7, 0x25)),
            ],
        }
    }
}

/// An ordered stop list plus the value domain it is stretched over.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
    vmin: f32,
    vmax: f32,
}

impl ColorScale {
    /// Create a scale from a named palette and a value domain.
    pub fn new(palette: Palette, vmin: f32, vmax: f32) -> Self {
        Self {
            stops: palette.stops(),
            vmin,
            vmax,
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn domain(&self) -> (f32, f32) {
        (self.vmin, self.vmax)
    }

    /// Normalize a value into [0, 1] over the domain, clamped at the
    /// boundaries. A zero-width domain maps every value to 0.5 so flat
    /// fields render as a single color instead of dividing by zero.
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.vmax - self.vmin;
        if range <= 0.0 {
            0.5
        } else {
            ((value - self.vmin) / range).clamp(0.0, 1.0)
        }
    }

    /// Interpolate the palette at a normalized fraction in [0, 1].
    pub fn sample(&self, fraction: f32) -> Color {
        let fraction = fraction.clamp(0.0, 1.0);
        let first = self.stops.first().expect("palettes are non-empty");
        if fraction <= first.position {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            if fraction <= high.position {
                let span = high.position - low.position;
                let t = if span <= 0.0 {
                    0.0
                } else {
                    (fraction - low.position) / span
                };
                return interpolate_color(low.color, high.color, t);
            }
        }
        self.stops.last().expect("palettes are non-empty").color
    }

    /// Color for a raw data value: normalize, then sample.
    pub fn color_at(&self, value: f32) -> Color {
        self.sample(self.normalize(value))
    }
}
