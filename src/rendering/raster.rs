//! Raster backend: draws the render model onto a tiny-skia pixmap and
//! encodes it as RGBA PNG.
//!
//! Map art is drawn directly from the shared [`Path`] command data, so the
//! coordinates match the SVG backend exactly. Typography is rasterized
//! through resvg from the same markup fragment the SVG backend emits, which
//! keeps text rendering on a single code path.

use crate::error::RenderError;
use crate::models::theme::hex_to_rgb;
use crate::models::{PosterLabels, RenderModel, Theme};
use crate::rendering::layout;
use crate::rendering::path::{Path, PathCommand};
use crate::rendering::style::STROKE_SCALE;
use crate::rendering::svg::typography_fragment;
use crate::services::fonts::FontLibrary;
use resvg::usvg::{self, Transform};
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, Pixmap, Point, Rect, SpreadMode, Stroke,
};

/// Render the full poster and encode it as a PNG byte buffer.
pub fn render_png(
    model: &RenderModel,
    theme: &Theme,
    labels: &PosterLabels,
    fonts: &FontLibrary,
) -> Result<Vec<u8>, RenderError> {
    let mut pixmap =
        Pixmap::new(model.width, model.height).ok_or(RenderError::PixmapAllocation {
            width: model.width,
            height: model.height,
        })?;

    pixmap.fill(skia_color(&theme.bg, 255));

    draw_areas(&mut pixmap, model, theme);
    draw_roads(&mut pixmap, model);
    draw_gradient_fades(&mut pixmap, model, theme);
    draw_typography(&mut pixmap, model, theme, labels, fonts)?;

    encode_png(model.width, model.height, &pixmap)
}

fn skia_color(hex: &str, alpha: u8) -> Color {
    let (r, g, b) = hex_to_rgb(hex);
    Color::from_rgba8(r, g, b, alpha)
}

/// Convert a shared path description into a tiny-skia path. None when the
/// description is empty.
fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    if path.is_empty() {
        return None;
    }
    let mut pb = tiny_skia::PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(x, y) => pb.move_to(x as f32, y as f32),
            PathCommand::LineTo(x, y) => pb.line_to(x as f32, y as f32),
            PathCommand::Close => pb.close(),
        }
    }
    pb.finish()
}

/// Water first, parks second: painter's order keeps parks above water and
/// both below the road network.
fn draw_areas(pixmap: &mut Pixmap, model: &RenderModel, theme: &Theme) {
    let mut paint = Paint {
        anti_alias: true,
        ..Default::default()
    };

    paint.set_color(skia_color(&theme.water, 255));
    for area in &model.water_areas {
        if let Some(path) = to_skia_path(&Path::closed(&area.points)) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    paint.set_color(skia_color(&theme.parks, 255));
    for area in &model.park_areas {
        if let Some(path) = to_skia_path(&Path::closed(&area.points)) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

fn draw_roads(pixmap: &mut Pixmap, model: &RenderModel) {
    let mut paint = Paint {
        anti_alias: true,
        ..Default::default()
    };

    for road in &model.roads {
        let Some(path) = to_skia_path(&Path::open(&road.points)) else {
            continue;
        };
        paint.set_color(skia_color(&road.color, 255));
        let stroke = Stroke {
            width: (road.width * STROKE_SCALE) as f32,
            line_cap: tiny_skia::LineCap::Round,
            line_join: tiny_skia::LineJoin::Round,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Vertical fade bands over the top and bottom quarter of the canvas,
/// opaque at the page edge and transparent toward the map.
fn draw_gradient_fades(pixmap: &mut Pixmap, model: &RenderModel, theme: &Theme) {
    let w = model.width as f32;
    let h = model.height as f32;
    let fade_height = h * layout::FADE_FRACTION as f32;

    let opaque = skia_color(&theme.gradient_color, 255);
    let transparent = skia_color(&theme.gradient_color, 0);

    let bands = [
        // (y_start, start_color, end_color)
        (0.0, opaque, transparent),
        (h - fade_height, transparent, opaque),
    ];

    for (y_start, from, to) in bands {
        let shader = LinearGradient::new(
            Point::from_xy(0.0, y_start),
            Point::from_xy(0.0, y_start + fade_height),
            vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
            SpreadMode::Pad,
            Transform::identity(),
        );
        let (Some(shader), Some(rect)) = (shader, Rect::from_xywh(0.0, y_start, w, fade_height))
        else {
            continue;
        };
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

/// Rasterize the typography fragment over the finished map art.
fn draw_typography(
    pixmap: &mut Pixmap,
    model: &RenderModel,
    theme: &Theme,
    labels: &PosterLabels,
    fonts: &FontLibrary,
) -> Result<(), RenderError> {
    let w = f64::from(model.width);
    let h = f64::from(model.height);

    let overlay = format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" ",
            "width=\"{w}\" height=\"{h}\">\n{body}</svg>\n",
        ),
        w = w,
        h = h,
        body = typography_fragment(theme, labels, w, h, fonts.family()),
    );

    let options = usvg::Options {
        fontdb: fonts.database(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(overlay.as_bytes(), &options)
        .map_err(|e| RenderError::SvgParse(e.to_string()))?;

    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    Ok(())
}

/// Encode the pixmap as an 8-bit RGBA PNG, demultiplying alpha.
fn encode_png(width: u32, height: u32, pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgba)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(out)
}
