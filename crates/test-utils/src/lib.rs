//! Shared test utilities for the forecast-overlays workspace.

pub mod generators;

pub use generators::{gradient_grid, uniform_grid, wind_component_grids};
