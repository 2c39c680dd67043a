//! Gridded field samples with geographic coordinate axes.

use crate::{BoundingBox, OverlayError, OverlayResult};

/// A 2-D array of samples on a regular lat/lon grid.
///
/// Values are stored in row-major order: `values[row * width + col]`, where
/// rows follow the latitude axis and columns the longitude axis. The axes may
/// be ascending or descending; the raster keeps the scan order of the source
/// so the image anchors to the bounding box without flipping.
#[derive(Debug, Clone)]
pub struct Grid {
    values: Vec<f32>,
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl Grid {
    /// Create a grid, checking the shape invariant
    /// `values.len() == lats.len() * lons.len()`.
    pub fn new(values: Vec<f32>, lats: Vec<f64>, lons: Vec<f64>) -> OverlayResult<Self> {
        if values.len() != lats.len() * lons.len() {
            return Err(OverlayError::ShapeMismatch(format!(
                "{} values for a {}x{} grid",
                values.len(),
                lats.len(),
                lons.len()
            )));
        }
        Ok(Self { values, lats, lons })
    }

    /// Number of columns (longitude points).
    pub fn width(&self) -> usize {
        self.lons.len()
    }

    /// Number of rows (latitude points).
    pub fn height(&self) -> usize {
        self.lats.len()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Geographic bounding box from the coordinate extrema.
    pub fn bbox(&self) -> BoundingBox {
        // New-constructed grids always have non-empty axes, but guard anyway.
        BoundingBox::from_axes(&self.lats, &self.lons)
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Map center as the mean of each coordinate axis.
    pub fn center(&self) -> (f64, f64) {
        let lat = self.lats.iter().sum::<f64>() / self.lats.len().max(1) as f64;
        let lon = self.lons.iter().sum::<f64>() / self.lons.len().max(1) as f64;
        (lat, lon)
    }

    /// Minimum and maximum over all finite samples.
    ///
    /// Fails with [`OverlayError::DegenerateRange`] when the grid holds no
    /// finite sample at all.
    pub fn finite_range(&self) -> OverlayResult<(f32, f32)> {
        let (mut min, mut max) = (f32::INFINITY, f32::NEG_INFINITY);
        for &v in &self.values {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            return Err(OverlayError::DegenerateRange(format!(
                "{}x{} grid has no finite samples",
                self.width(),
                self.height()
            )));
        }
        Ok((min, max))
    }

    /// Apply a function to every sample, keeping the axes.
    pub fn map<F>(mut self, f: F) -> Self
    where
        F: Fn(f32) -> f32,
    {
        for v in &mut self.values {
            *v = f(*v);
        }
        self
    }

    /// Combine two co-located grids elementwise. The grids must share their
    /// shape; the axes of the first grid are kept.
    pub fn zip_map<F>(a: Self, b: &Self, f: F) -> OverlayResult<Self>
    where
        F: Fn(f32, f32) -> f32,
    {
        if a.width() != b.width() || a.height() != b.height() {
            return Err(OverlayError::ShapeMismatch(format!(
                "{}x{} vs {}x{}",
                a.width(),
                a.height(),
                b.width(),
                b.height()
            )));
        }
        let mut a = a;
        for (va, &vb) in a.values.iter_mut().zip(&b.values) {
            *va = f(*va, vb);
        }
        Ok(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x3(values: Vec<f32>) -> Grid {
        Grid::new(values, vec![50.0, 49.0], vec![10.0, 11.0, 12.0]).unwrap()
    }

    #[test]
    fn test_shape_invariant() {
        let result = Grid::new(vec![1.0; 5], vec![50.0, 49.0], vec![10.0, 11.0, 12.0]);
        assert!(matches!(result, Err(OverlayError::ShapeMismatch(_))));
    }

    #[test]
    fn test_dimensions() {
        let grid = grid_2x3(vec![0.0; 6]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_bbox_and_center() {
        let grid = grid_2x3(vec![0.0; 6]);
        let bbox = grid.bbox();
        assert_eq!(bbox.south, 49.0);
        assert_eq!(bbox.north, 50.0);
        assert_eq!(bbox.west, 10.0);
        assert_eq!(bbox.east, 12.0);

        let (lat, lon) = grid.center();
        assert!((lat - 49.5).abs() < 1e-9);
        assert!((lon - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_finite_range_skips_nan() {
        let grid = grid_2x3(vec![1.0, f32::NAN, 3.0, -2.0, f32::INFINITY, 0.0]);
        let (min, max) = grid.finite_range().unwrap();
        assert_eq!(min, -2.0);
        assert_eq!(max, 3.0);
    }

    #[test]
    fn test_finite_range_all_nan() {
        let grid = grid_2x3(vec![f32::NAN; 6]);
        assert!(matches!(
            grid.finite_range(),
            Err(OverlayError::DegenerateRange(_))
        ));
    }

    #[test]
    fn test_zip_map_shape_mismatch() {
        let a = grid_2x3(vec![0.0; 6]);
        let b = Grid::new(vec![0.0; 4], vec![50.0, 49.0], vec![10.0, 11.0]).unwrap();
        assert!(matches!(
            Grid::zip_map(a, &b, |x, y| x + y),
            Err(OverlayError::ShapeMismatch(_))
        ));
    }
}
