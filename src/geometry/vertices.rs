//! Rotated glyph bounding polygons
//!
//! Rotation angles are in degrees. The raster is rotated with the same
//! transform returned by [`rotation_transform`], so vertices computed here
//! always describe where the rendered ink ends up.

use super::canvas::CanvasSpec;
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// Corners of a rotated bounding box.
///
/// Winding order follows the *unrotated* box: top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphVertices(pub [Point; 4]);

impl GlyphVertices {
    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    pub fn min_x(&self) -> f64 {
        self.0.iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
    }

    pub fn max_x(&self) -> f64 {
        self.0.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_y(&self) -> f64 {
        self.0.iter().map(|p| p.y).fold(f64::INFINITY, f64::min)
    }

    pub fn max_y(&self) -> f64 {
        self.0.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max)
    }

    /// Shift every vertex by `(dx, dy)`
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self(self.0.map(|p| Point::new(p.x + dx, p.y + dy)))
    }

    /// True when every vertex is on the canvas
    pub fn fits_within(&self, canvas: &CanvasSpec) -> bool {
        self.0.iter().all(|p| canvas.contains(*p))
    }

    /// First vertex that falls off the canvas, if any
    pub fn first_outside(&self, canvas: &CanvasSpec) -> Option<Point> {
        self.0.iter().copied().find(|p| !canvas.contains(*p))
    }
}

/// Affine transform rotating by `degrees` about `center`.
///
/// Vertices use the inverse of the nominal angle so that a positive
/// rotation turns the glyph the same way an image `rotate` call would.
pub fn rotation_transform(center: Point, degrees: f64) -> Affine {
    Affine::rotate_about(-degrees.to_radians(), center)
}

/// Rotate an axis-aligned box about its own centre.
///
/// A zero-size box collapses to four copies of its centre; callers decide
/// what an empty extent means for them.
pub fn rotate_bbox(bbox: Rect, degrees: f64) -> GlyphVertices {
    let transform = rotation_transform(bbox.center(), degrees);
    let corners = [
        Point::new(bbox.x0, bbox.y0),
        Point::new(bbox.x1, bbox.y0),
        Point::new(bbox.x1, bbox.y1),
        Point::new(bbox.x0, bbox.y1),
    ];
    GlyphVertices(corners.map(|p| transform * p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let bbox = Rect::new(-12.5, -20.0, 12.5, 20.0);
        let vertices = rotate_bbox(bbox, 0.0);
        assert_close(vertices.0[0], Point::new(-12.5, -20.0));
        assert_close(vertices.0[1], Point::new(12.5, -20.0));
        assert_close(vertices.0[2], Point::new(12.5, 20.0));
        assert_close(vertices.0[3], Point::new(-12.5, 20.0));
    }

    #[test]
    fn test_quarter_turn_swaps_extents() {
        let bbox = Rect::new(10.0, 10.0, 30.0, 50.0);
        let vertices = rotate_bbox(bbox, 90.0);
        // 20 wide, 40 tall about centre (20, 30) becomes 40 wide, 20 tall
        assert!((vertices.min_x() - 0.0).abs() < 1e-9);
        assert!((vertices.max_x() - 40.0).abs() < 1e-9);
        assert!((vertices.min_y() - 20.0).abs() < 1e-9);
        assert!((vertices.max_y() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_positive_angle_uses_inverse_rotation() {
        // top-left corner of a box centred at origin, rotated +90
        let vertices = rotate_bbox(Rect::new(-1.0, -1.0, 1.0, 1.0), 90.0);
        assert_close(vertices.0[0], Point::new(-1.0, 1.0));
    }

    #[test]
    fn test_zero_size_box_propagates() {
        let vertices = rotate_bbox(Rect::new(5.0, 5.0, 5.0, 5.0), 33.0);
        for p in vertices.points() {
            assert_close(*p, Point::new(5.0, 5.0));
        }
    }

    #[test]
    fn test_rotation_preserves_centre() {
        let bbox = Rect::new(-8.0, -3.0, 8.0, 3.0);
        let vertices = rotate_bbox(bbox, 27.5);
        let cx = vertices.points().iter().map(|p| p.x).sum::<f64>() / 4.0;
        let cy = vertices.points().iter().map(|p| p.y).sum::<f64>() / 4.0;
        assert_close(Point::new(cx, cy), Point::ZERO);
    }

    #[test]
    fn test_fits_within() {
        let canvas = CanvasSpec::square(100);
        let vertices = rotate_bbox(Rect::new(-10.0, -10.0, 10.0, 10.0), 45.0);
        assert!(vertices.translate(50.0, 50.0).fits_within(&canvas));
        assert!(!vertices.translate(5.0, 50.0).fits_within(&canvas));
        assert!(vertices.translate(5.0, 50.0).first_outside(&canvas).is_some());
    }
}
