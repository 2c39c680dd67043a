//! Image rendering for forecast overlays.
//!
//! Implements the raster and vector halves of the visualization:
//! - Color scales (ordered stops + domain)
//! - Gradient rasterization with transparent missing samples
//! - PNG encoding
//! - SVG legend bars

pub mod colorscale;
pub mod gradient;
pub mod legend;
pub mod png;

pub use colorscale::{Color, ColorScale, ColorStop, Palette};
