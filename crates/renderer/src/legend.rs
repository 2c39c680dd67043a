//! SVG legend bars.
//!
//! The legend is the vector twin of the raster gradient: it reads the same
//! [`ColorScale`] stops and domain, so the bar and the overlay can never
//! drift apart.

use std::fmt::Write;

use crate::colorscale::ColorScale;

/// Default legend bar geometry, in CSS pixels.
pub const LEGEND_WIDTH: u32 = 260;
pub const LEGEND_HEIGHT: u32 = 46;

const BAR_HEIGHT: u32 = 12;
const MARGIN: u32 = 10;

/// Render a horizontal gradient bar with min/mid/max tick labels and a
/// caption, e.g. "Temperature at 2m (\u{b0}C)".
pub fn render_svg(caption: &str, scale: &ColorScale, gradient_id: &str) -> String {
    let (vmin, vmax) = scale.domain();
    let vmid = vmin + (vmax - vmin) / 2.0;
    let bar_width = LEGEND_WIDTH - 2 * MARGIN;

    let mut svg = String::new();
    // Writing to a String cannot fail; unwraps here are infallible.
    write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{LEGEND_WIDTH}" height="{LEGEND_HEIGHT}">"#
    )
    .unwrap();
    write!(svg, r#"<defs><linearGradient id="{gradient_id}">"#).unwrap();
    for stop in scale.stops() {
        write!(
            svg,
            r#"<stop offset="{:.1}%" stop-color="{}"/>"#,
            stop.position * 100.0,
            stop.color.hex()
        )
        .unwrap();
    }
    svg.push_str("</linearGradient></defs>");

    write!(
        svg,
        r##"<text x="{MARGIN}" y="11" font-family="sans-serif" font-size="11" fill="#333">{}</text>"##,
        escape_xml(caption)
    )
    .unwrap();
    write!(
        svg,
        r##"<rect x="{MARGIN}" y="16" width="{bar_width}" height="{BAR_HEIGHT}" fill="url(#{gradient_id})" stroke="#999" stroke-width="0.5"/>"##
    )
    .unwrap();

    // Tick labels under the bar
    let ticks = [
        (MARGIN, "start", vmin),
        (MARGIN + bar_width / 2, "middle", vmid),
        (MARGIN + bar_width, "end", vmax),
    ];
    for (x, anchor, value) in ticks {
        write!(
            svg,
            r##"<text x="{x}" y="40" font-family="sans-serif" font-size="10" fill="#333" text-anchor="{anchor}">{}</text>"##,
            format_tick(value)
        )
        .unwrap();
    }

    svg.push_str("</svg>");
    svg
}

fn format_tick(value: f32) -> String {
    if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorscale::{ColorScale, Palette};

    #[test]
    fn test_legend_carries_all_palette_stops() {
        let scale = ColorScale::new(Palette::Jet, -10.0, 30.0);
        let svg = render_svg("Temperature at 2m (\u{b0}C)", &scale, "t2m");

        for stop in scale.stops() {
            assert!(svg.contains(&stop.color.hex()));
        }
        assert!(svg.contains("Temperature at 2m"));
    }

    #[test]
    fn test_legend_domain_labels() {
        let scale = ColorScale::new(Palette::Viridis, 0.0, 25.0);
        let svg = render_svg("Wind Speed at 10m (m/s)", &scale, "wind");

        assert!(svg.contains(">0.0<"));
        assert!(svg.contains(">12.5<"));
        assert!(svg.contains(">25.0<"));
    }

    #[test]
    fn test_caption_is_escaped() {
        let scale = ColorScale::new(Palette::Jet, 0.0, 1.0);
        let svg = render_svg("a < b & c", &scale, "x");
        assert!(svg.contains("a &lt; b &amp; c"));
    }
}
