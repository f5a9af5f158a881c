//! Geometric Primitives and Operations
//!
//! Canvas bounds and the rotated bounding polygon of a glyph.

pub mod canvas;
pub mod vertices;

// Re-export commonly used items
pub use canvas::CanvasSpec;
pub use vertices::{rotate_bbox, rotation_transform, GlyphVertices};
