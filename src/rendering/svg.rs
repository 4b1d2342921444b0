//! SVG backend: emits a standalone vector document for the render model.
//!
//! Map art paths come from the shared [`Path`] builder so the coordinates in
//! the `d` attributes are identical to what the raster backend draws.

use crate::models::theme::hex_to_rgb;
use crate::models::{PosterLabels, RenderModel, Theme};
use crate::rendering::layout;
use crate::rendering::path::Path;
use crate::rendering::style::STROKE_SCALE;

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Render the full poster as an SVG document.
pub fn render_svg(
    model: &RenderModel,
    theme: &Theme,
    labels: &PosterLabels,
    font_family: &str,
) -> String {
    let w = f64::from(model.width);
    let h = f64::from(model.height);
    let fade_height = h * layout::FADE_FRACTION;
    let (r, g, b) = hex_to_rgb(&theme.gradient_color);

    let mut svg = format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" ",
            "width=\"{w}\" height=\"{h}\">\n",
            "  <defs>\n",
            "    <linearGradient id=\"fadeTop\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">\n",
            "      <stop offset=\"0%\" stop-color=\"rgb({r},{g},{b})\" stop-opacity=\"1\"/>\n",
            "      <stop offset=\"100%\" stop-color=\"rgb({r},{g},{b})\" stop-opacity=\"0\"/>\n",
            "    </linearGradient>\n",
            "    <linearGradient id=\"fadeBottom\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">\n",
            "      <stop offset=\"0%\" stop-color=\"rgb({r},{g},{b})\" stop-opacity=\"0\"/>\n",
            "      <stop offset=\"100%\" stop-color=\"rgb({r},{g},{b})\" stop-opacity=\"1\"/>\n",
            "    </linearGradient>\n",
            "  </defs>\n",
        ),
        w = w,
        h = h,
        r = r,
        g = g,
        b = b,
    );

    // Background
    svg.push_str(&format!(
        "  <rect fill=\"{}\" width=\"{w}\" height=\"{h}\"/>\n",
        theme.bg
    ));

    // Painter's order: water below parks below roads
    for area in &model.water_areas {
        let path = Path::closed(&area.points);
        if !path.is_empty() {
            svg.push_str(&format!(
                "  <path fill=\"{}\" d=\"{}\"/>\n",
                theme.water,
                path.to_svg_data()
            ));
        }
    }

    for area in &model.park_areas {
        let path = Path::closed(&area.points);
        if !path.is_empty() {
            svg.push_str(&format!(
                "  <path fill=\"{}\" d=\"{}\"/>\n",
                theme.parks,
                path.to_svg_data()
            ));
        }
    }

    for road in &model.roads {
        let path = Path::open(&road.points);
        if !path.is_empty() {
            svg.push_str(&format!(
                concat!(
                    "  <path fill=\"none\" stroke=\"{}\" stroke-width=\"{:.1}\" ",
                    "stroke-linecap=\"round\" stroke-linejoin=\"round\" d=\"{}\"/>\n",
                ),
                road.color,
                road.width * STROKE_SCALE,
                path.to_svg_data()
            ));
        }
    }

    // Gradient fades above the map art, under the text
    svg.push_str(&format!(
        "  <rect fill=\"url(#fadeTop)\" x=\"0\" y=\"0\" width=\"{w}\" height=\"{fade_height}\"/>\n"
    ));
    svg.push_str(&format!(
        "  <rect fill=\"url(#fadeBottom)\" x=\"0\" y=\"{}\" width=\"{w}\" height=\"{fade_height}\"/>\n",
        h - fade_height
    ));

    svg.push_str(&typography_fragment(theme, labels, w, h, font_family));
    svg.push_str("</svg>\n");

    svg
}

/// The typography block: city, country, coordinates, divider and caption.
/// Also rasterized standalone by the raster backend so text renders through
/// one code path.
pub fn typography_fragment(
    theme: &Theme,
    labels: &PosterLabels,
    w: f64,
    h: f64,
    font_family: &str,
) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        concat!(
            "  <text x=\"{}\" y=\"{}\" fill=\"{}\" font-family=\"{}\" font-size=\"{}\" ",
            "font-weight=\"bold\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
        ),
        w / 2.0,
        h * layout::CITY_Y,
        theme.text,
        font_family,
        layout::CITY_FONT_SIZE,
        escape_xml(&labels.spaced_city())
    ));

    svg.push_str(&format!(
        concat!(
            "  <text x=\"{}\" y=\"{}\" fill=\"{}\" font-family=\"{}\" font-size=\"{}\" ",
            "font-weight=\"300\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
        ),
        w / 2.0,
        h * layout::COUNTRY_Y,
        theme.text,
        font_family,
        layout::COUNTRY_FONT_SIZE,
        escape_xml(&labels.country.to_uppercase())
    ));

    svg.push_str(&format!(
        concat!(
            "  <text x=\"{}\" y=\"{}\" fill=\"{}\" fill-opacity=\"{}\" font-family=\"{}\" ",
            "font-size=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
        ),
        w / 2.0,
        h * layout::COORDS_Y,
        theme.text,
        layout::COORDS_OPACITY,
        font_family,
        layout::COORDS_FONT_SIZE,
        escape_xml(&labels.coordinate_label())
    ));

    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        w * layout::DIVIDER_X_START,
        h * layout::DIVIDER_Y,
        w * layout::DIVIDER_X_END,
        h * layout::DIVIDER_Y,
        theme.text,
        layout::DIVIDER_STROKE,
    ));

    svg.push_str(&format!(
        concat!(
            "  <text x=\"{}\" y=\"{}\" fill=\"{}\" fill-opacity=\"{}\" font-family=\"{}\" ",
            "font-size=\"{}\" font-weight=\"300\" text-anchor=\"end\" ",
            "dominant-baseline=\"middle\">{}</text>\n",
        ),
        w * layout::CAPTION_X,
        h * layout::CAPTION_Y,
        theme.text,
        layout::CAPTION_OPACITY,
        font_family,
        layout::CAPTION_FONT_SIZE,
        escape_xml(layout::CAPTION_TEXT)
    ));

    svg
}
