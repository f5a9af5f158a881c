//! kurbo → tiny-skia bridge and coverage extraction

use super::RenderError;
use crate::geometry::CanvasSpec;
use image::GrayImage;
use kurbo::{BezPath, PathEl};
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

/// Convert a kurbo path into a tiny-skia path (None when it has no area)
pub fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c0, c1, p) => builder.cubic_to(
                c0.x as f32,
                c0.y as f32,
                c1.x as f32,
                c1.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Fill `path` at full intensity on a zero canvas and return the coverage
/// as a single-channel image.
pub fn fill_coverage(path: &BezPath, canvas: CanvasSpec) -> Result<GrayImage, RenderError> {
    let canvas_error = || RenderError::Canvas {
        width: canvas.width,
        height: canvas.height,
    };
    let mut pixmap = Pixmap::new(canvas.width, canvas.height).ok_or_else(canvas_error)?;

    if let Some(skia_path) = to_skia_path(path) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);
        paint.anti_alias = true;
        pixmap.fill_path(
            &skia_path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    let coverage: Vec<u8> = pixmap.pixels().iter().map(|p| p.alpha()).collect();
    GrayImage::from_raw(canvas.width, canvas.height, coverage).ok_or_else(canvas_error)
}
