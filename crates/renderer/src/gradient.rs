//! Gradient rasterization for gridded forecast data.

use crate::colorscale::ColorScale;

/// Render grid samples through a color scale into RGBA pixel data.
///
/// Each sample is normalized over the scale's domain and looked up in the
/// palette. Non-finite samples become fully transparent pixels; finite
/// samples are fully opaque (layer opacity is applied at composition time,
/// not baked into the raster).
///
/// # Arguments
/// - `data`: grid samples (row-major order)
/// - `width`: number of columns
/// - `height`: number of rows
/// - `scale`: color scale carrying the (vmin, vmax) domain
///
/// # Returns
/// RGBA pixel data (4 bytes per pixel, `width * height * 4` bytes)
pub fn rasterize(data: &[f32], width: usize, height: usize, scale: &ColorScale) -> Vec<u8> {
    let mut pixels = vec![0u8; width * height * 4];

    for (idx, &value) in data.iter().enumerate().take(width * height) {
        if !value.is_finite() {
            // Transparent pixel; the buffer is zeroed already
            continue;
        }

        let color = scale.color_at(value);
        let pixel_idx = idx * 4;
        pixels[pixel_idx] = color.r;
        pixels[pixel_idx + 1] = color.g;
        pixels[pixel_idx + 2] = color.b;
        pixels[pixel_idx + 3] = 255;
    }

    pixels
}

/// Upscale grid samples by an integer factor using nearest-neighbour
/// replication.
///
/// Nearest keeps missing (NaN) samples intact instead of bleeding them into
/// neighbouring cells, so the transparent area of the raster still matches
/// the data exactly.
pub fn upscale(data: &[f32], width: usize, height: usize, factor: usize) -> (Vec<f32>, usize, usize) {
    if factor <= 1 {
        return (data.to_vec(), width, height);
    }

    let dst_width = width * factor;
    let dst_height = height * factor;
    let mut output = vec![0.0f32; dst_width * dst_height];

    for y in 0..dst_height {
        let src_row = y / factor;
        for x in 0..dst_width {
            let src_col = x / factor;
            output[y * dst_width + x] = data[src_row * width + src_col];
        }
    }

    (output, dst_width, dst_height)
}
