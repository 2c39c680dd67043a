//! Synthetic grid generators for the test suite.
//!
//! All generators place their grids on the same geographic patch: latitudes
//! descending from 50°N, longitudes ascending from 10°E, 1° spacing. Tests
//! can therefore assert exact bounding boxes and centers.

use overlay_common::Grid;

fn axes(width: usize, height: usize) -> (Vec<f64>, Vec<f64>) {
    let lats: Vec<f64> = (0..height).map(|j| 50.0 - j as f64).collect();
    let lons: Vec<f64> = (0..width).map(|i| 10.0 + i as f64).collect();
    (lats, lons)
}

/// A grid holding the same value everywhere.
pub fn uniform_grid(width: usize, height: usize, value: f32) -> Grid {
    let (lats, lons) = axes(width, height);
    Grid::new(vec![value; width * height], lats, lons).expect("consistent shape")
}

/// A grid with predictable values: `row * width + col`, as f32.
pub fn gradient_grid(width: usize, height: usize) -> Grid {
    let (lats, lons) = axes(width, height);
    let values: Vec<f32> = (0..width * height).map(|i| i as f32).collect();
    Grid::new(values, lats, lons).expect("consistent shape")
}

/// Uniform u/v wind component grids sharing one set of axes.
pub fn wind_component_grids(width: usize, height: usize, u: f32, v: f32) -> (Grid, Grid) {
    (uniform_grid(width, height, u), uniform_grid(width, height, v))
}
