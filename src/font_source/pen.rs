//! Outline pen collecting skrifa draw commands into a kurbo path

use kurbo::{BezPath, Point};
use skrifa::outline::OutlinePen;

/// Records a glyph outline, flipping font space (y up) into canvas space
/// (y down).
#[derive(Debug, Default)]
pub struct BezPathPen {
    path: BezPath,
}

impl BezPathPen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> BezPath {
        self.path
    }

    fn point(x: f32, y: f32) -> Point {
        Point::new(f64::from(x), -f64::from(y))
    }
}

impl OutlinePen for BezPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(Self::point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(Self::point(x, y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to(Self::point(cx0, cy0), Self::point(x, y));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            Self::point(cx0, cy0),
            Self::point(cx1, cy1),
            Self::point(x, y),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
