//! The extract, derive, rasterize, compose pipeline.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use overlay_common::{Field, OverlayResult};
use renderer::gradient::{rasterize, upscale};
use renderer::legend;
use renderer::png::create_png;
use renderer::ColorScale;

use crate::config::{FieldConfig, RunConfig};
use crate::map::{MapDocument, Overlay};

/// Run the whole pipeline: extract each configured field, rasterize it to a
/// PNG in the output directory, then compose and write the map document.
/// Returns the path of the written document.
///
/// Any extraction or rendering failure aborts the run; no document is
/// written unless every field rendered.
pub fn run(config: &RunConfig) -> Result<PathBuf> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;

    let mut fields = Vec::with_capacity(config.fields.len());
    for field_config in &config.fields {
        let selector = field_config.selector();
        let grids = grib_extract::extract(&config.input, &selector)
            .with_context(|| format!("Failed to extract field '{}'", field_config.name))?;

        let field = Field::derive(
            &field_config.name,
            &field_config.units,
            field_config.derivation,
            grids,
        )?;
        info!(
            field = %field.name,
            width = field.grid.width(),
            height = field.grid.height(),
            vmin = field.range.0,
            vmax = field.range.1,
            "derived field"
        );
        fields.push(field);
    }

    let (images, document) = compose(config, &fields)?;

    for (field_config, png) in config.fields.iter().zip(&images) {
        let image_path = config.output_dir.join(&field_config.image_file);
        fs::write(&image_path, png)
            .with_context(|| format!("Failed to write {}", image_path.display()))?;
        info!(path = %image_path.display(), bytes = png.len(), "wrote overlay image");
    }

    let map_path = config.output_dir.join(&config.map_file);
    document
        .save(&map_path)
        .with_context(|| format!("Failed to write {}", map_path.display()))?;

    Ok(map_path)
}

/// Rasterize every derived field and assemble the map document.
///
/// The view centers on the primary field (the one starting visible); with
/// none marked, the first field wins, matching `RunConfig::validate`.
pub fn compose(config: &RunConfig, fields: &[Field]) -> Result<(Vec<Vec<u8>>, MapDocument)> {
    let mut images = Vec::with_capacity(fields.len());
    let mut overlays = Vec::with_capacity(fields.len());

    for (index, (field, field_config)) in fields.iter().zip(&config.fields).enumerate() {
        let (png, overlay) = build_overlay(field, field_config, config.upscale, index)?;
        images.push(png);
        overlays.push(overlay);
    }

    let primary = config.fields.iter().position(|f| f.visible).unwrap_or(0);
    let center = fields
        .get(primary)
        .map(|f| f.grid.center())
        .context("run configuration lists no fields")?;

    Ok((images, MapDocument::new(center, config.zoom, overlays)))
}

/// Rasterize one derived field into PNG bytes and its composition metadata.
///
/// The color scale is stretched over the field's own finite range unless the
/// configuration fixes a domain; raster and legend read the same scale.
pub fn build_overlay(
    field: &Field,
    config: &FieldConfig,
    upscale_factor: usize,
    index: usize,
) -> OverlayResult<(Vec<u8>, Overlay)> {
    let (vmin, vmax) = config.domain.unwrap_or(field.range);
    let scale = ColorScale::new(config.palette, vmin, vmax);

    let (samples, width, height) = upscale(
        field.grid.values(),
        field.grid.width(),
        field.grid.height(),
        upscale_factor,
    );
    let pixels = rasterize(&samples, width, height, &scale);
    let png = create_png(&pixels, width, height)?;

    let caption = format!("{} ({})", field.name, field.units);
    let legend_svg = legend::render_svg(&caption, &scale, &format!("grad{index}"));

    let overlay = Overlay {
        image_file: config.image_file.clone(),
        bounds: field.grid.bbox(),
        name: field.name.clone(),
        opacity: config.opacity,
        visible: config.visible,
        legend_svg,
    };
    Ok((png, overlay))
}
