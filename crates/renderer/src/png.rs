//! PNG encoding for RGBA image data.
//!
//! Encodes color type 6 (RGBA) images: overlay rasters use continuous
//! palettes with an alpha channel, so the full-color path is the one that
//! matters here.

use std::io::Write;

use overlay_common::{OverlayError, OverlayResult};

/// Create a PNG image from RGBA pixel data (color type 6).
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> OverlayResult<Vec<u8>> {
    if pixels.len() != width * height * 4 {
        return Err(OverlayError::Render(format!(
            "pixel buffer holds {} bytes, expected {} for {}x{} RGBA",
            pixels.len(),
            width * height * 4,
            width,
            height
        )));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat_rgba(pixels, width, height)
        .map_err(|e| OverlayError::Render(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let crc_data = [chunk_type.as_slice(), data].concat();
    png.extend_from_slice(&crc32fast::hash(&crc_data).to_be_bytes());
}

/// Deflate RGBA image data for the IDAT chunk.
fn deflate_idat_rgba(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    // Prefix each scanline with filter byte 0 (no filter)
    let mut uncompressed = Vec::with_capacity(height * (1 + width * 4));
    for y in 0..height {
        uncompressed.push(0);
        let row_start = y * width * 4;
        let row_end = row_start + width * 4;
        uncompressed.extend_from_slice(&pixels[row_start..row_end]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_png_signature_and_ihdr() {
        let pixels = vec![255u8; 2 * 2 * 4];
        let png = create_png(&pixels, 2, 2).unwrap();

        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        // IHDR length + type
        assert_eq!(&png[8..12], &13u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        // width and height
        assert_eq!(&png[16..20], &2u32.to_be_bytes());
        assert_eq!(&png[20..24], &2u32.to_be_bytes());
        // bit depth 8, color type 6
        assert_eq!(png[24], 8);
        assert_eq!(png[25], 6);
    }

    #[test]
    fn test_create_png_ends_with_iend() {
        let pixels = vec![0u8; 4];
        let png = create_png(&pixels, 1, 1).unwrap();
        let tail = &png[png.len() - 8..png.len() - 4];
        assert_eq!(tail, b"IEND");
    }

    #[test]
    fn test_create_png_rejects_short_buffer() {
        let result = create_png(&[0u8; 7], 2, 2);
        assert!(result.is_err());
    }
}
