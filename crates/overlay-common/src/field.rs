//! Derived display fields.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Grid, OverlayError, OverlayResult};

/// Conversion from extracted grids to a display quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// `celsius = kelvin - 273.15`, one input grid.
    KelvinToCelsius,
    /// `sqrt(u^2 + v^2)` over two co-located component grids.
    VectorMagnitude,
}

impl Derivation {
    /// Number of input grids the derivation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Derivation::KelvinToCelsius => 1,
            Derivation::VectorMagnitude => 2,
        }
    }
}

/// A derived field ready for rasterization: grid, display metadata, and the
/// value range used to stretch the color scale.
#[derive(Debug, Clone)]
pub struct Field {
    pub grid: Grid,
    pub name: String,
    pub units: String,
    /// Finite (min, max); zero-width when the grid has no finite samples.
    pub range: (f32, f32),
}

impl Field {
    /// Apply a derivation to extracted grids and compute the value range.
    ///
    /// A grid without finite samples keeps a zero-width (0, 0) domain so
    /// rasterization still succeeds (every pixel ends up transparent anyway).
    pub fn derive(
        name: impl Into<String>,
        units: impl Into<String>,
        derivation: Derivation,
        mut grids: Vec<Grid>,
    ) -> OverlayResult<Self> {
        let name = name.into();
        if grids.len() != derivation.arity() {
            return Err(OverlayError::ShapeMismatch(format!(
                "derivation for '{}' expects {} grid(s), got {}",
                name,
                derivation.arity(),
                grids.len()
            )));
        }

        let grid = match derivation {
            Derivation::KelvinToCelsius => grids.remove(0).map(|k| k - 273.15),
            Derivation::VectorMagnitude => {
                let v = grids.pop().expect("arity checked above");
                let u = grids.pop().expect("arity checked above");
                Grid::zip_map(u, &v, |u, v| (u * u + v * v).sqrt())?
            }
        };

        let range = match grid.finite_range() {
            Ok(range) => range,
            Err(OverlayError::DegenerateRange(msg)) => {
                warn!(field = %name, %msg, "falling back to zero-width domain");
                (0.0, 0.0)
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            grid,
            name,
            units: units.into(),
            range,
        })
    }
}
