//! Leaflet map composition.
//!
//! Builds one self-contained HTML document: an OpenStreetMap base layer, one
//! image overlay per field anchored to its geographic bounds, an expanded
//! layer control, and a fixed legend per field. The document references the
//! overlay PNGs by relative file name, so it must live in the same directory
//! they are written to.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use overlay_common::{BoundingBox, OverlayResult};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// One rendered overlay ready for composition.
#[derive(Debug, Clone)]
pub struct Overlay {
    /// PNG file name, relative to the document.
    pub image_file: String,
    pub bounds: BoundingBox,
    /// Display name shown in the layer control.
    pub name: String,
    pub opacity: f32,
    /// Whether the layer starts on the map.
    pub visible: bool,
    pub legend_svg: String,
}

/// The interactive map: view settings plus ordered overlays.
#[derive(Debug, Clone)]
pub struct MapDocument {
    center: (f64, f64),
    zoom: u8,
    overlays: Vec<Overlay>,
}

impl MapDocument {
    pub fn new(center: (f64, f64), zoom: u8, overlays: Vec<Overlay>) -> Self {
        Self {
            center,
            zoom,
            overlays,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Serialize the complete HTML document.
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\"/>\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"/>\n",
        );
        html.push_str("<title>Forecast Overlays</title>\n");
        let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\"/>");
        let _ = writeln!(html, "<script src=\"{LEAFLET_JS}\"></script>");
        html.push_str(
            "<style>\n\
             html, body, #map { height: 100%; margin: 0; }\n\
             .legend-box { position: fixed; right: 10px; z-index: 1000;\n\
               background: rgba(255, 255, 255, 0.85); border-radius: 4px;\n\
               box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3); padding: 2px; }\n\
             img.leaflet-image-layer { image-rendering: pixelated; }\n\
             </style>\n",
        );
        html.push_str("</head>\n<body>\n<div id=\"map\"></div>\n");

        // Legends stack bottom-up along the right edge
        for (index, overlay) in self.overlays.iter().enumerate() {
            let bottom = 10 + index as u32 * 56;
            let _ = writeln!(
                html,
                "<div class=\"legend-box\" style=\"bottom: {bottom}px;\">{}</div>",
                overlay.legend_svg
            );
        }

        html.push_str("<script>\n");
        let _ = writeln!(
            html,
            "var map = L.map('map').setView([{:.4}, {:.4}], {});",
            self.center.0, self.center.1, self.zoom
        );
        html.push_str(
            "L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {\n\
             \x20 maxZoom: 19,\n\
             \x20 attribution: '&copy; OpenStreetMap contributors'\n\
             }).addTo(map);\n",
        );

        for (index, overlay) in self.overlays.iter().enumerate() {
            let b = overlay.bounds;
            let _ = writeln!(
                html,
                "var overlay{index} = L.imageOverlay(\"{}\", [[{:.4}, {:.4}], [{:.4}, {:.4}]], {{opacity: {}}});",
                escape_js(&overlay.image_file),
                b.south,
                b.west,
                b.north,
                b.east,
                overlay.opacity
            );
            if overlay.visible {
                let _ = writeln!(html, "overlay{index}.addTo(map);");
            }
        }

        html.push_str("var overlayMaps = {\n");
        for (index, overlay) in self.overlays.iter().enumerate() {
            let _ = writeln!(
                html,
                "  \"{}\": overlay{index},",
                escape_js(&overlay.name)
            );
        }
        html.push_str("};\n");
        html.push_str("L.control.layers(null, overlayMaps, {collapsed: false}).addTo(map);\n");
        html.push_str("</script>\n</body>\n</html>\n");

        html
    }

    /// Write the document to disk in one shot.
    pub fn save(&self, path: &Path) -> OverlayResult<()> {
        let html = self.to_html();
        fs::write(path, &html)?;
        info!(
            path = %path.display(),
            bytes = html.len(),
            overlays = self.overlays.len(),
            "wrote map document"
        );
        Ok(())
    }
}

fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
