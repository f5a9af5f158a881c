//! Fixed-size drawing canvas

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Allowed slack when comparing re-derived geometry against canvas edges.
///
/// Bounding boxes are recomputed from translated outlines, which can drift
/// from the planned placement by a few ulps.
pub const EDGE_TOLERANCE: f64 = 1e-6;

/// Canvas dimensions in pixels, fixed for a whole generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
}

impl CanvasSpec {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square canvas
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Largest usable x coordinate (`width - 1`)
    pub fn max_x(&self) -> f64 {
        f64::from(self.width) - 1.0
    }

    /// Largest usable y coordinate (`height - 1`)
    pub fn max_y(&self) -> f64 {
        f64::from(self.height) - 1.0
    }

    /// The geometric centre, used for probe renders
    pub fn center(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Whether a point lies within `[0, width-1] × [0, height-1]`
    pub fn contains(&self, point: Point) -> bool {
        point.x >= -EDGE_TOLERANCE
            && point.y >= -EDGE_TOLERANCE
            && point.x <= self.max_x() + EDGE_TOLERANCE
            && point.y <= self.max_y() + EDGE_TOLERANCE
    }
}
