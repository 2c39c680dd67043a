//! Forecast overlay pipeline: GRIB2 file in, three PNG overlays plus one
//! interactive Leaflet map out.

pub mod config;
pub mod map;
pub mod pipeline;

pub use config::{FieldConfig, RunConfig};
pub use map::{MapDocument, Overlay};
pub use pipeline::run;
