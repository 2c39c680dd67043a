//! Tests for gradient rasterization.

use renderer::colorscale::{ColorScale, Palette};
use renderer::gradient::{rasterize, upscale};

#[test]
fn test_rasterize_pixel_dimensions_match_grid() {
    let scale = ColorScale::new(Palette::Jet, 0.0, 1.0);
    let data: Vec<f32> = (0..30).map(|i| i as f32 / 30.0).collect();
    let pixels = rasterize(&data, 6, 5, &scale);
    assert_eq!(pixels.len(), 6 * 5 * 4);
}

#[test]
fn test_finite_samples_are_opaque() {
    let scale = ColorScale::new(Palette::Jet, 0.0, 3.0);
    let data = vec![0.0, 1.0, 2.0, 3.0];
    let pixels = rasterize(&data, 2, 2, &scale);

    for pixel in pixels.chunks_exact(4) {
        assert_eq!(pixel[3], 255);
    }
}

#[test]
fn test_non_finite_samples_are_transparent() {
    let scale = ColorScale::new(Palette::Viridis, 0.0, 1.0);
    let data = vec![f32::NAN, 0.5, f32::INFINITY, 1.0];
    let pixels = rasterize(&data, 2, 2, &scale);

    assert_eq!(&pixels[0..4], &[0, 0, 0, 0]); // NaN
    assert_eq!(pixels[7], 255); // finite
    assert_eq!(&pixels[8..12], &[0, 0, 0, 0]); // infinity
    assert_eq!(pixels[15], 255);
}

#[test]
fn test_flat_field_renders_single_color() {
    // vmin == vmax: every finite sample maps to the 0.5 fraction
    let scale = ColorScale::new(Palette::Jet, 5.0, 5.0);
    let data = vec![5.0; 9];
    let pixels = rasterize(&data, 3, 3, &scale);

    let first = &pixels[0..4];
    for pixel in pixels.chunks_exact(4) {
        assert_eq!(pixel, first);
        assert_eq!(pixel[3], 255);
    }

    let expected = scale.sample(0.5);
    assert_eq!(first[0], expected.r);
    assert_eq!(first[1], expected.g);
    assert_eq!(first[2], expected.b);
}

#[test]
fn test_independent_stretch_uses_own_domain() {
    // The same value colors differently under different domains
    let narrow = ColorScale::new(Palette::Jet, 0.0, 10.0);
    let wide = ColorScale::new(Palette::Jet, 0.0, 100.0);

    let narrow_pixels = rasterize(&[10.0], 1, 1, &narrow);
    let wide_pixels = rasterize(&[10.0], 1, 1, &wide);
    assert_ne!(narrow_pixels, wide_pixels);
}

#[test]
fn test_upscaled_raster_keeps_transparency_shape() {
    let scale = ColorScale::new(Palette::Jet, 0.0, 1.0);
    let data = vec![f32::NAN, 1.0, 1.0, 1.0];
    let (scaled, w, h) = upscale(&data, 2, 2, 3);
    let pixels = rasterize(&scaled, w, h, &scale);

    assert_eq!(pixels.len(), 6 * 6 * 4);
    // Top-left 3x3 block is transparent, the rest opaque
    for y in 0..6 {
        for x in 0..6 {
            let alpha = pixels[(y * 6 + x) * 4 + 3];
            if y < 3 && x < 3 {
                assert_eq!(alpha, 0);
            } else {
                assert_eq!(alpha, 255);
            }
        }
    }
}
