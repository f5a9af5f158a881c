//! Font files and glyph outlines
//!
//! This module loads font binaries, resolves named variations and turns
//! glyphs into outlines in canvas pixel space (y pointing down). Everything
//! downstream consumes outlines through the [`GlyphSource`] trait so it can
//! be exercised without font files.

pub mod face;
pub mod pen;

use kurbo::{BezPath, Rect, Shape, Vec2};
use std::path::PathBuf;
use thiserror::Error;

// Explicit re-exports for public API
pub use face::{FontFace, FontInstance};
pub use pen::BezPathPen;

/// Failures from the font engine
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a usable font: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("failed to draw '{ch}': {reason}")]
    Draw { ch: char, reason: String },
}

/// Anything that can produce a glyph outline for a character.
pub trait GlyphSource {
    /// Outline of `ch` at `size` pixels per em, y-down, relative to the
    /// glyph's drawing origin. Unsupported characters yield an empty path.
    fn outline(&self, ch: char, size: f64) -> Result<BezPath, FontError>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn outline(&self, ch: char, size: f64) -> Result<BezPath, FontError> {
        (**self).outline(ch, size)
    }
}

/// Tight bounds of a path, or a zero rect for a path with no segments
pub fn ink_bounds(path: &BezPath) -> Rect {
    if path.elements().is_empty() {
        return Rect::ZERO;
    }
    path.bounding_box()
}

/// Ink box of `ch` using the centre anchor convention.
///
/// The returned rect is relative to a draw origin at the visual centre of
/// the glyph, so `x0 == -x1` and `y0 == -y1`. Whitespace and unsupported
/// characters give a zero-size rect.
pub fn glyph_extent(source: &impl GlyphSource, ch: char, size: f64) -> Result<Rect, FontError> {
    let bounds = ink_bounds(&source.outline(ch, size)?);
    let half = Vec2::new(bounds.width() / 2.0, bounds.height() / 2.0);
    Ok(Rect::new(-half.x, -half.y, half.x, half.y))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Synthetic glyph sources for tests that should not depend on font files

    use super::*;

    /// Draws every letter as an axis-aligned block, offset from the origin
    /// like real glyphs sitting on a baseline. Spaces are blank.
    pub struct BlockGlyphs {
        pub width_per_em: f64,
        pub height_per_em: f64,
    }

    impl Default for BlockGlyphs {
        fn default() -> Self {
            Self {
                width_per_em: 0.6,
                height_per_em: 0.7,
            }
        }
    }

    impl GlyphSource for BlockGlyphs {
        fn outline(&self, ch: char, size: f64) -> Result<BezPath, FontError> {
            if ch.is_whitespace() {
                return Ok(BezPath::new());
            }
            let rect = Rect::new(
                0.05 * size,
                -self.height_per_em * size,
                (0.05 + self.width_per_em) * size,
                0.0,
            );
            Ok(rect.to_path(0.1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::BlockGlyphs;
    use super::*;

    #[test]
    fn test_extent_is_centered() {
        let extent = glyph_extent(&BlockGlyphs::default(), 'A', 100.0).unwrap();
        assert!((extent.x0 + 30.0).abs() < 1e-9);
        assert!((extent.x1 - 30.0).abs() < 1e-9);
        assert!((extent.y0 + 35.0).abs() < 1e-9);
        assert!((extent.y1 - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_whitespace_extent_is_empty() {
        let extent = glyph_extent(&BlockGlyphs::default(), ' ', 100.0).unwrap();
        assert_eq!(extent, Rect::ZERO);
    }
}
