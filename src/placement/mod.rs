//! Placement sampling
//!
//! Derives the range of draw centres that keep a rotated glyph on the
//! canvas and samples one. Ranges depend on the character, font, size and
//! rotation together, so a fresh range is computed for every instance.

use crate::font_source::{glyph_extent, FontError, GlyphSource};
use crate::geometry::{rotate_bbox, CanvasSpec, GlyphVertices};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Decimal places kept for sampled coordinates
pub const PLACEMENT_DECIMALS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlacementError {
    /// No draw centre keeps the glyph on the canvas
    #[error(
        "'{ch}' at size {size} rotated {rotation} cannot fit on a {width}x{height} canvas: \
         {axis} range [{lower:.3}, {upper:.3}] is empty"
    )]
    DoesNotFit {
        ch: char,
        size: f64,
        rotation: f64,
        width: u32,
        height: u32,
        axis: Axis,
        lower: f64,
        upper: f64,
    },

    #[error(transparent)]
    Font(#[from] FontError),
}

/// A concrete draw instruction for one glyph instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementSample {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation_degrees: f64,
}

/// Inclusive ranges of valid draw centres
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRange {
    pub x: RangeInclusive<f64>,
    pub y: RangeInclusive<f64>,
}

impl PlacementRange {
    /// Ranges for a rotated polygon given as offsets from the draw centre.
    ///
    /// Returns the offending axis with its empty bounds when the polygon is
    /// too large for the canvas.
    pub fn from_vertices(
        vertices: &GlyphVertices,
        canvas: &CanvasSpec,
    ) -> Result<Self, (Axis, f64, f64)> {
        let x = (vertices.min_x().abs(), canvas.max_x() - vertices.max_x().abs());
        let y = (vertices.min_y().abs(), canvas.max_y() - vertices.max_y().abs());
        if x.0 > x.1 {
            return Err((Axis::X, x.0, x.1));
        }
        if y.0 > y.1 {
            return Err((Axis::Y, y.0, y.1));
        }
        Ok(Self {
            x: x.0..=x.1,
            y: y.0..=y.1,
        })
    }
}

/// Valid draw-centre ranges for `ch` at `size` and `rotation` on `canvas`
pub fn placement_range(
    source: &impl GlyphSource,
    ch: char,
    size: f64,
    rotation: f64,
    canvas: &CanvasSpec,
) -> Result<PlacementRange, PlacementError> {
    let extent = glyph_extent(source, ch, size)?;
    let vertices = rotate_bbox(extent, rotation);
    PlacementRange::from_vertices(&vertices, canvas).map_err(|(axis, lower, upper)| {
        PlacementError::DoesNotFit {
            ch,
            size,
            rotation,
            width: canvas.width,
            height: canvas.height,
            axis,
            lower,
            upper,
        }
    })
}

/// Sample a draw centre uniformly from the valid ranges.
///
/// Coordinates are rounded to [`PLACEMENT_DECIMALS`] without leaving the
/// valid range.
pub fn sample_placement<R: Rng>(
    rng: &mut R,
    source: &impl GlyphSource,
    ch: char,
    size: f64,
    rotation: f64,
    canvas: &CanvasSpec,
) -> Result<PlacementSample, PlacementError> {
    let range = placement_range(source, ch, size, rotation, canvas)?;
    let does_not_fit = |axis, range: &RangeInclusive<f64>| PlacementError::DoesNotFit {
        ch,
        size,
        rotation,
        width: canvas.width,
        height: canvas.height,
        axis,
        lower: *range.start(),
        upper: *range.end(),
    };

    let x = round_within(rng.gen_range(range.x.clone()), &range.x)
        .ok_or_else(|| does_not_fit(Axis::X, &range.x))?;
    let y = round_within(rng.gen_range(range.y.clone()), &range.y)
        .ok_or_else(|| does_not_fit(Axis::Y, &range.y))?;

    Ok(PlacementSample {
        x,
        y,
        size,
        rotation_degrees: rotation,
    })
}

/// Round `value` to the given number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Round to [`PLACEMENT_DECIMALS`], nudging back inside `range` if rounding
/// crossed an edge. None if the range holds no representable value.
fn round_within(value: f64, range: &RangeInclusive<f64>) -> Option<f64> {
    let scale = 10f64.powi(PLACEMENT_DECIMALS as i32);
    let mut rounded = round_to(value, PLACEMENT_DECIMALS);
    if rounded < *range.start() {
        rounded = (range.start() * scale).ceil() / scale;
    }
    if rounded > *range.end() {
        rounded = (range.end() * scale).floor() / scale;
    }
    range.contains(&rounded).then_some(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::testing::BlockGlyphs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_range_for_unrotated_block() {
        let canvas = CanvasSpec::square(256);
        let range = placement_range(&BlockGlyphs::default(), 'A', 100.0, 0.0, &canvas).unwrap();
        // 60 x 70 block
        assert!((range.x.start() - 30.0).abs() < 1e-9);
        assert!((range.x.end() - 225.0).abs() < 1e-9);
        assert!((range.y.start() - 35.0).abs() < 1e-9);
        assert!((range.y.end() - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_large_glyph_does_not_fit() {
        let canvas = CanvasSpec::square(256);
        let glyphs = BlockGlyphs {
            width_per_em: 0.6,
            height_per_em: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = sample_placement(&mut rng, &glyphs, 'M', 300.0, 0.0, &canvas);
        assert!(matches!(
            result,
            Err(PlacementError::DoesNotFit { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn test_rotation_shrinks_range() {
        let canvas = CanvasSpec::square(256);
        let upright = placement_range(&BlockGlyphs::default(), 'A', 100.0, 0.0, &canvas).unwrap();
        let tilted = placement_range(&BlockGlyphs::default(), 'A', 100.0, 15.0, &canvas).unwrap();
        assert!(tilted.x.start() > upright.x.start());
        assert!(tilted.y.end() < upright.y.end());
    }

    #[test]
    fn test_samples_keep_polygon_on_canvas() {
        let canvas = CanvasSpec::new(200, 120);
        let glyphs = BlockGlyphs::default();
        let mut rng = StdRng::seed_from_u64(25102025);
        for i in 0..200 {
            let size = 12.0 + (i % 9) as f64 * 10.0;
            let rotation = -15.0 + (i % 31) as f64;
            let sample = sample_placement(&mut rng, &glyphs, 'q', size, rotation, &canvas).unwrap();

            let extent = glyph_extent(&glyphs, 'q', size).unwrap();
            let vertices = rotate_bbox(extent, rotation).translate(sample.x, sample.y);
            assert!(vertices.fits_within(&canvas), "{sample:?} leaves the canvas");
            assert_eq!(round_to(sample.x, 3), sample.x);
            assert_eq!(round_to(sample.y, 3), sample.y);
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let canvas = CanvasSpec::square(256);
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            sample_placement(&mut rng, &BlockGlyphs::default(), 'k', 64.0, 7.5, &canvas).unwrap()
        };
        assert_eq!(draw(7), draw(7));
    }

    #[test]
    fn test_round_within_nudges_inside() {
        assert_eq!(round_within(1.0004, &(1.0003..=2.0)), Some(1.001));
        assert_eq!(round_within(1.9996, &(1.0..=1.9997)), Some(1.999));
        assert_eq!(round_within(1.00031, &(1.0003..=1.0004)), None);
    }

    #[test]
    fn test_blank_glyph_can_go_anywhere() {
        let canvas = CanvasSpec::square(10);
        let range = placement_range(&BlockGlyphs::default(), ' ', 50.0, 12.0, &canvas).unwrap();
        assert_eq!(range.x, 0.0..=9.0);
        assert_eq!(range.y, 0.0..=9.0);
    }
}
