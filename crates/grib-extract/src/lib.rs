//! Field extraction from GRIB2 sources.
//!
//! Each [`extract`] call performs an independent open/parse/close cycle over
//! the source file. The three fields of a run may use mutually exclusive
//! filters, so no cursor state is shared between extractions.

pub mod params;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use grib::{FixedSurface, Grib2SubmessageDecoder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use overlay_common::{Grid, OverlayError, OverlayResult};

/// Vertical level classification, following GRIB2 fixed surface types
/// (Code Table 4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelType {
    /// Ground or water surface (type 1)
    Surface,
    /// Isobaric surface, level value in hPa (type 100, stored in Pa)
    IsobaricInhPa,
    /// Height above ground, level value in metres (type 103)
    HeightAboveGround,
}

impl LevelType {
    fn surface_type_code(&self) -> u8 {
        match self {
            LevelType::Surface => 1,
            LevelType::IsobaricInhPa => 100,
            LevelType::HeightAboveGround => 103,
        }
    }

    /// Check a submessage's first fixed surface against this level type and
    /// an optional level value (hPa for isobaric, metres for height).
    pub fn matches(&self, surface: &FixedSurface, level: Option<f64>) -> bool {
        if surface.surface_type != self.surface_type_code() {
            return false;
        }
        let Some(wanted) = level else {
            return true;
        };
        let actual = match self {
            LevelType::Surface => return true,
            LevelType::IsobaricInhPa => surface.value() / 100.0,
            LevelType::HeightAboveGround => surface.value(),
        };
        (actual - wanted).abs() < 1e-3
    }
}

/// Which subset of the source to extract: a level classification, an optional
/// level value, and one or more variable names. Built once per field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selector {
    pub level_type: LevelType,
    pub level: Option<f64>,
    pub variables: Vec<String>,
}

impl Selector {
    pub fn new(level_type: LevelType, level: Option<f64>, variables: Vec<String>) -> Self {
        Self {
            level_type,
            level,
            variables,
        }
    }

    /// Human-readable level description for error messages.
    pub fn describe_level(&self) -> String {
        match (self.level_type, self.level) {
            (LevelType::Surface, _) => "surface".to_string(),
            (LevelType::IsobaricInhPa, Some(p)) => format!("{p} hPa"),
            (LevelType::IsobaricInhPa, None) => "isobaric level".to_string(),
            (LevelType::HeightAboveGround, Some(h)) => format!("{h} m above ground"),
            (LevelType::HeightAboveGround, None) => "height above ground".to_string(),
        }
    }
}

/// Extract one grid per requested variable, in request order, from a GRIB2
/// file. All grids returned by one call share their coordinate axes.
///
/// Fails with [`OverlayError::Selection`] when no submessage matches a
/// requested level/variable combination, and [`OverlayError::DataRead`] when
/// the file cannot be parsed or a matching submessage cannot be decoded.
pub fn extract<P: AsRef<Path>>(path: P, selector: &Selector) -> OverlayResult<Vec<Grid>> {
    let path = path.as_ref();

    let wanted: Vec<(u8, u8, u8)> = selector
        .variables
        .iter()
        .map(|name| {
            params::parameter_code(name).ok_or_else(|| {
                OverlayError::Selection(format!("unknown variable name '{name}'"))
            })
        })
        .collect::<OverlayResult<_>>()?;

    let file = File::open(path)?;
    let grib2 = grib::from_reader(BufReader::new(file))
        .map_err(|e| OverlayError::DataRead(format!("{}: {e}", path.display())))?;

    let mut found: Vec<Option<Grid>> = vec![None; wanted.len()];

    for (index, submessage) in grib2.iter() {
        let discipline = submessage.indicator().discipline;
        let prod_def = submessage.prod_def();
        let (Some(category), Some(number)) =
            (prod_def.parameter_category(), prod_def.parameter_number())
        else {
            continue;
        };

        let slot = wanted
            .iter()
            .position(|&key| key == (discipline, category, number));
        let Some(slot) = slot else {
            continue;
        };
        if found[slot].is_some() {
            // First match wins; later forecast steps are ignored
            continue;
        }

        let Some((first_surface, _)) = prod_def.fixed_surfaces() else {
            continue;
        };
        if !selector.level_type.matches(&first_surface, selector.level) {
            continue;
        }

        debug!(
            variable = %selector.variables[slot],
            level = %selector.describe_level(),
            index = ?index,
            "matched submessage"
        );

        found[slot] = Some(decode_grid(submessage)?);
        if found.iter().all(Option::is_some) {
            break;
        }
    }

    selector
        .variables
        .iter()
        .zip(found)
        .map(|(name, grid)| {
            grid.ok_or_else(|| {
                OverlayError::Selection(format!(
                    "variable '{}' at {} not present in {}",
                    name,
                    selector.describe_level(),
                    path.display()
                ))
            })
        })
        .collect()
}

/// Decode a matched submessage into a [`Grid`], recovering the coordinate
/// axes from the grid-point iterator: the first scan row gives the longitude
/// axis, the row strides give the latitude axis.
fn decode_grid<R: grib::Grib2Read>(
    submessage: grib::SubMessage<'_, R>,
) -> OverlayResult<Grid> {
    let (nx, ny) = submessage
        .grid_shape()
        .map_err(|e| OverlayError::DataRead(format!("unsupported grid definition: {e:?}")))?;

    let latlons: Vec<(f32, f32)> = submessage
        .latlons()
        .map_err(|e| OverlayError::DataRead(format!("cannot compute grid points: {e:?}")))?
        .collect();
    if latlons.len() != nx * ny || nx == 0 {
        return Err(OverlayError::DataRead(format!(
            "grid point count {} does not match declared {}x{} shape",
            latlons.len(),
            nx,
            ny
        )));
    }

    let lons: Vec<f64> = latlons[..nx].iter().map(|&(_, lon)| f64::from(lon)).collect();
    let lats: Vec<f64> = latlons
        .iter()
        .step_by(nx)
        .map(|&(lat, _)| f64::from(lat))
        .collect();

    let decoder = Grib2SubmessageDecoder::from(submessage)
        .map_err(|e| OverlayError::DataRead(format!("cannot create decoder: {e:?}")))?;
    let values: Vec<f32> = decoder
        .dispatch()
        .map_err(|e| OverlayError::DataRead(format!("cannot decode values: {e:?}")))?
        .collect();

    Grid::new(values, lats, lons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_level_matches_type_only() {
        let selector = LevelType::Surface;
        assert!(selector.matches(&FixedSurface::new(1, 0, 0), None));
        assert!(!selector.matches(&FixedSurface::new(100, 0, 50000), None));
    }

    #[test]
    fn test_isobaric_level_compared_in_hpa() {
        // 500 hPa is stored as 50000 Pa
        let surface = FixedSurface::new(100, 0, 50000);
        assert!(LevelType::IsobaricInhPa.matches(&surface, Some(500.0)));
        assert!(!LevelType::IsobaricInhPa.matches(&surface, Some(850.0)));
        // No level requested: any isobaric surface matches
        assert!(LevelType::IsobaricInhPa.matches(&surface, None));
    }

    #[test]
    fn test_height_above_ground_in_metres() {
        let surface = FixedSurface::new(103, 0, 10);
        assert!(LevelType::HeightAboveGround.matches(&surface, Some(10.0)));
        assert!(!LevelType::HeightAboveGround.matches(&surface, Some(2.0)));
    }

    #[test]
    fn test_scaled_level_values() {
        // 925.5 hPa encoded with scale factor 1: 925500 * 10^-1 Pa
        let surface = FixedSurface::new(100, 1, 925_500);
        assert!(LevelType::IsobaricInhPa.matches(&surface, Some(925.5)));
    }

    #[test]
    fn test_unknown_variable_is_selection_error() {
        let selector = Selector::new(LevelType::Surface, None, vec!["bogus".into()]);
        let result = extract("/nonexistent.grb", &selector);
        assert!(matches!(result, Err(OverlayError::Selection(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let selector = Selector::new(LevelType::Surface, None, vec!["t".into()]);
        let result = extract("/nonexistent.grb", &selector);
        assert!(matches!(result, Err(OverlayError::Io(_))));
    }

    #[test]
    fn test_describe_level() {
        assert_eq!(
            Selector::new(LevelType::IsobaricInhPa, Some(500.0), vec!["t".into()])
                .describe_level(),
            "500 hPa"
        );
        assert_eq!(
            Selector::new(LevelType::HeightAboveGround, Some(10.0), vec!["u10".into()])
                .describe_level(),
            "10 m above ground"
        );
    }
}
