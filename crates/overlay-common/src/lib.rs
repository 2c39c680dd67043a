//! Common types shared across the forecast-overlays workspace.

pub mod bbox;
pub mod error;
pub mod field;
pub mod grid;

pub use bbox::BoundingBox;
pub use error::{OverlayError, OverlayResult};
pub use field::{Derivation, Field};
pub use grid::Grid;
