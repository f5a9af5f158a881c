//! Glyph rasterization
//!
//! This module draws a single glyph onto a fixed-size, single-channel canvas:
//! - Placement by the visual centre of the ink box
//! - Rotation about the glyph's rendered centre
//! - The authoritative on-canvas check, made against the placed outline
//!
//! Nothing here touches the filesystem.

pub mod raster;

use crate::font_source::{ink_bounds, FontError, FontFace, GlyphSource};
use crate::geometry::{rotate_bbox, rotation_transform, CanvasSpec};
use image::GrayImage;
use kurbo::{Affine, Vec2};
use thiserror::Error;

/// Named variation requested for probe renders and dataset images
pub const REGULAR_VARIATION: &str = "Regular";

/// Failures from the glyph renderer
#[derive(Debug, Error)]
pub enum RenderError {
    /// The font engine could not produce the glyph
    #[error("render failure: {0}")]
    Failure(#[from] FontError),

    #[error(
        "'{ch}' at size {size} rotated {rotation} overflows the {width}x{height} canvas \
         (vertex at {x:.3}, {y:.3})"
    )]
    Overflow {
        ch: char,
        size: f64,
        rotation: f64,
        width: u32,
        height: u32,
        x: f64,
        y: f64,
    },

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
}

/// One glyph draw instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub ch: char,
    pub size: f64,
    /// Draw centre, in canvas pixels
    pub x: f64,
    pub y: f64,
    /// Degrees; see [`rotation_transform`] for the direction
    pub rotation: f64,
    pub canvas: CanvasSpec,
}

impl RenderRequest {
    /// An unrotated render at the centre of the canvas
    pub fn centered(ch: char, size: f64, canvas: CanvasSpec) -> Self {
        let center = canvas.center();
        Self {
            ch,
            size,
            x: center.x,
            y: center.y,
            rotation: 0.0,
            canvas,
        }
    }
}

/// Render `request` with a glyph source that already has its variation fixed.
///
/// Fails with [`RenderError::Overflow`] if any corner of the rotated ink box
/// of the placed glyph leaves `[0, width-1] × [0, height-1]`.
pub fn rasterize(
    source: &impl GlyphSource,
    request: &RenderRequest,
) -> Result<GrayImage, RenderError> {
    let mut path = source.outline(request.ch, request.size)?;

    let target = Vec2::new(request.x, request.y);
    let offset = target - ink_bounds(&path).center().to_vec2();
    path.apply_affine(Affine::translate(offset));

    // Re-derive from the placed outline rather than trusting the planned extent
    let placed = ink_bounds(&path);
    let vertices = rotate_bbox(placed, request.rotation);
    if let Some(vertex) = vertices.first_outside(&request.canvas) {
        return Err(RenderError::Overflow {
            ch: request.ch,
            size: request.size,
            rotation: request.rotation,
            width: request.canvas.width,
            height: request.canvas.height,
            x: vertex.x,
            y: vertex.y,
        });
    }

    path.apply_affine(rotation_transform(placed.center(), request.rotation));
    raster::fill_coverage(&path, request.canvas)
}

/// Render a glyph from a font file, selecting a named variation if possible.
pub fn render_glyph(
    font: &FontFace,
    variation: Option<&str>,
    request: &RenderRequest,
) -> Result<GrayImage, RenderError> {
    let instance = font.instance(variation)?;
    rasterize(&instance, request)
}
