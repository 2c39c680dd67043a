//! Run configuration.
//!
//! A run is described by a [`RunConfig`]: the input file, output locations,
//! map view settings, and one [`FieldConfig`] per overlay. Configurations are
//! loaded from YAML; the built-in default renders the standard trio of
//! 2 m temperature, 500 hPa temperature, and 10 m wind speed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use grib_extract::{LevelType, Selector};
use overlay_common::Derivation;
use renderer::Palette;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// GRIB2 source file.
    pub input: PathBuf,

    /// Directory receiving the PNGs and the map document.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the composed HTML document.
    #[serde(default = "default_map_file")]
    pub map_file: String,

    /// Initial Leaflet zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Integer raster upscale factor (nearest neighbour). 1 keeps one pixel
    /// per grid cell.
    #[serde(default = "default_upscale")]
    pub upscale: usize,

    pub fields: Vec<FieldConfig>,
}

/// One overlay: what to extract, how to derive and color it, and how it
/// appears on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Display name, used in the layer control and the legend caption.
    pub name: String,

    /// Unit label for the legend caption. Not used in any computation.
    pub units: String,

    /// PNG file name, relative to the output directory.
    pub image_file: String,

    pub level_type: LevelType,

    /// Level value: hPa for isobaric levels, metres for height above ground.
    #[serde(default)]
    pub level: Option<f64>,

    /// Variable short names, in the order the derivation consumes them.
    pub variables: Vec<String>,

    pub derivation: Derivation,

    pub palette: Palette,

    /// Layer opacity applied by Leaflet at composition time.
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Whether the overlay starts visible. Exactly one field per run is.
    #[serde(default)]
    pub visible: bool,

    /// Fixed (vmin, vmax) domain for raster and legend alike. Defaults to
    /// the field's own finite range.
    #[serde(default)]
    pub domain: Option<(f32, f32)>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_map_file() -> String {
    "interactive_forecast.html".to_string()
}

fn default_zoom() -> u8 {
    7
}

fn default_upscale() -> usize {
    1
}

fn default_opacity() -> f32 {
    0.7
}

impl FieldConfig {
    /// The extraction selector for this field.
    pub fn selector(&self) -> Selector {
        Selector::new(self.level_type, self.level, self.variables.clone())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("forecast.grib2"),
            output_dir: default_output_dir(),
            map_file: default_map_file(),
            zoom: default_zoom(),
            upscale: default_upscale(),
            fields: vec![
                FieldConfig {
                    name: "2m Temperature".to_string(),
                    units: "\u{b0}C".to_string(),
                    image_file: "t2m_map.png".to_string(),
                    // Analysis files carry the 2 m temperature as a surface
                    // field, so the selector matches on level type alone
                    level_type: LevelType::Surface,
                    level: None,
                    variables: vec!["t".to_string()],
                    derivation: Derivation::KelvinToCelsius,
                    palette: Palette::Jet,
                    opacity: default_opacity(),
                    visible: true,
                    domain: None,
                },
                FieldConfig {
                    name: "500hPa Temperature".to_string(),
                    units: "\u{b0}C".to_string(),
                    image_file: "t500_map.png".to_string(),
                    level_type: LevelType::IsobaricInhPa,
                    level: Some(500.0),
                    variables: vec!["t".to_string()],
                    derivation: Derivation::KelvinToCelsius,
                    palette: Palette::Jet,
                    opacity: default_opacity(),
                    visible: false,
                    domain: None,
                },
                FieldConfig {
                    name: "10m Wind Speed".to_string(),
                    units: "m/s".to_string(),
                    image_file: "wind_map.png".to_string(),
                    level_type: LevelType::HeightAboveGround,
                    level: Some(10.0),
                    variables: vec!["u10".to_string(), "v10".to_string()],
                    derivation: Derivation::VectorMagnitude,
                    palette: Palette::Viridis,
                    opacity: default_opacity(),
                    visible: false,
                    domain: None,
                },
            ],
        }
    }
}

impl RunConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Check the configuration and normalize layer visibility so exactly one
    /// field starts visible (the first marked one wins; with none marked, the
    /// first field becomes the primary).
    pub fn validate(&mut self) -> Result<()> {
        if self.fields.is_empty() {
            bail!("run configuration lists no fields");
        }
        for field in &self.fields {
            if field.variables.len() != field.derivation.arity() {
                bail!(
                    "field '{}': derivation expects {} variable(s), got {}",
                    field.name,
                    field.derivation.arity(),
                    field.variables.len()
                );
            }
            if !(0.0..=1.0).contains(&field.opacity) {
                bail!("field '{}': opacity {} not in [0, 1]", field.name, field.opacity);
            }
        }

        let primary = self
            .fields
            .iter()
            .position(|f| f.visible)
            .unwrap_or_else(|| {
                warn!("no field marked visible, defaulting to the first");
                0
            });
        let extra_visible = self.fields.iter().skip(primary + 1).any(|f| f.visible);
        if extra_visible {
            warn!(
                primary = %self.fields[primary].name,
                "multiple fields marked visible, keeping only the first"
            );
        }
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.visible = index == primary;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let mut config = RunConfig::default();
        config.validate().unwrap();

        assert_eq!(config.fields.len(), 3);
        assert_eq!(config.zoom, 7);
        let visible: Vec<_> = config.fields.iter().filter(|f| f.visible).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "2m Temperature");
    }

    #[test]
    fn test_default_temperature_is_a_surface_field() {
        // The 2 m temperature sits on the surface level, without a level value
        let config = RunConfig::default();
        assert_eq!(config.fields[0].level_type, LevelType::Surface);
        assert_eq!(config.fields[0].level, None);
    }

    #[test]
    fn test_validate_keeps_first_visible() {
        let mut config = RunConfig::default();
        for field in &mut config.fields {
            field.visible = true;
        }
        config.validate().unwrap();

        assert!(config.fields[0].visible);
        assert!(!config.fields[1].visible);
        assert!(!config.fields[2].visible);
    }

    #[test]
    fn test_validate_promotes_a_primary() {
        let mut config = RunConfig::default();
        for field in &mut config.fields {
            field.visible = false;
        }
        config.validate().unwrap();
        assert!(config.fields[0].visible);
    }

    #[test]
    fn test_validate_rejects_arity_mismatch() {
        let mut config = RunConfig::default();
        config.fields[2].variables = vec!["u10".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut config = RunConfig::default();
        config.fields.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_config_parses() {
        let yaml = r#"
input: gfs.grib2
zoom: 5
fields:
  - name: Surface Temperature
    units: "C"
    image_file: sfc.png
    level_type: surface
    variables: [t]
    derivation: kelvin_to_celsius
    palette: jet
    visible: true
    domain: [-20.0, 40.0]
"#;
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.zoom, 5);
        assert_eq!(config.map_file, "interactive_forecast.html");
        assert_eq!(config.fields[0].domain, Some((-20.0, 40.0)));
        assert_eq!(config.fields[0].opacity, 0.7);
    }
}
