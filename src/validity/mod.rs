//! Font validity testing
//!
//! A font is usable only if it renders every probe character, renders them
//! as mostly distinct glyphs, and leaves ink on the canvas for each one.
//! This is a classification step: renderer errors become a failing
//! [`Verdict`] and never escape.

use crate::font_source::{FontFace, GlyphSource};
use crate::geometry::CanvasSpec;
use crate::rendering::{rasterize, RenderError, RenderRequest, REGULAR_VARIATION};
use image::GrayImage;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Outcome of testing one font
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Usable,
    /// The file could not be opened as a font
    Unreadable(String),
    RenderFailed { ch: char, reason: String },
    Overflow { ch: char },
    /// One raster occurred `count` times, more than allowed
    DuplicateGlyphs { count: usize },
    /// A probe character left the canvas empty
    BlankGlyph { ch: char },
}

impl Verdict {
    pub fn is_usable(&self) -> bool {
        matches!(self, Verdict::Usable)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Usable => write!(f, "usable"),
            Verdict::Unreadable(reason) => write!(f, "unreadable: {reason}"),
            Verdict::RenderFailed { ch, reason } => write!(f, "failed to render '{ch}': {reason}"),
            Verdict::Overflow { ch } => write!(f, "'{ch}' overflows the probe canvas"),
            Verdict::DuplicateGlyphs { count } => {
                write!(f, "{count} probe characters share one glyph")
            }
            Verdict::BlankGlyph { ch } => write!(f, "'{ch}' renders blank"),
        }
    }
}

/// Renders a probe character set and judges the result
#[derive(Debug, Clone)]
pub struct FontValidityTester {
    probe: Vec<char>,
    size: f64,
    canvas: CanvasSpec,
    max_identical: usize,
}

impl FontValidityTester {
    pub fn new(
        probe: impl Into<Vec<char>>,
        size: f64,
        canvas: CanvasSpec,
        max_identical: usize,
    ) -> Self {
        Self {
            probe: probe.into(),
            size,
            canvas,
            max_identical,
        }
    }

    pub fn probe(&self) -> &[char] {
        &self.probe
    }

    pub fn canvas(&self) -> CanvasSpec {
        self.canvas
    }

    /// Test a font file using its "Regular" named variation when it has one
    pub fn check_font(&self, path: &Path) -> Verdict {
        let face = match FontFace::open(path) {
            Ok(face) => face,
            Err(e) => return Verdict::Unreadable(e.to_string()),
        };
        let verdict = match face.instance(Some(REGULAR_VARIATION)) {
            Ok(instance) => self.check(&instance),
            Err(e) => Verdict::Unreadable(e.to_string()),
        };
        if !verdict.is_usable() {
            debug!("Rejected {}: {}", path.display(), verdict);
        }
        verdict
    }

    /// Test a glyph source
    pub fn check(&self, source: &impl GlyphSource) -> Verdict {
        let mut images = Vec::with_capacity(self.probe.len());
        for &ch in &self.probe {
            let request = RenderRequest::centered(ch, self.size, self.canvas);
            match rasterize(source, &request) {
                Ok(image) => images.push(image),
                Err(RenderError::Overflow { .. }) => return Verdict::Overflow { ch },
                Err(RenderError::Failure(e)) => {
                    return Verdict::RenderFailed {
                        ch,
                        reason: e.to_string(),
                    }
                }
                Err(other) => {
                    return Verdict::RenderFailed {
                        ch,
                        reason: other.to_string(),
                    }
                }
            }
        }

        let most_repeated = most_repeated_raster(&images);
        if most_repeated > self.max_identical {
            return Verdict::DuplicateGlyphs {
                count: most_repeated,
            };
        }

        if let Some((&ch, _)) = self
            .probe
            .iter()
            .zip(&images)
            .find(|(_, image)| is_blank(image))
        {
            return Verdict::BlankGlyph { ch };
        }

        Verdict::Usable
    }
}

/// Largest number of identical rasters in the set
fn most_repeated_raster(images: &[GrayImage]) -> usize {
    let mut counts: HashMap<&[u8], usize> = HashMap::new();
    for image in images {
        *counts.entry(image.as_raw().as_slice()).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

fn is_blank(image: &GrayImage) -> bool {
    image.as_raw().iter().all(|&v| v == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::testing::BlockGlyphs;
    use crate::font_source::FontError;
    use kurbo::{BezPath, Rect, Shape};

    /// Block glyphs whose width depends on the character
    struct DistinctGlyphs;

    impl GlyphSource for DistinctGlyphs {
        fn outline(&self, ch: char, size: f64) -> Result<BezPath, FontError> {
            let width = (0.2 + (ch as u32 % 20) as f64 * 0.03) * size;
            Ok(Rect::new(0.0, -0.7 * size, width, 0.0).to_path(0.1))
        }
    }

    /// Renders nothing for every character
    struct BlankGlyphs;

    impl GlyphSource for BlankGlyphs {
        fn outline(&self, _ch: char, _size: f64) -> Result<BezPath, FontError> {
            Ok(BezPath::new())
        }
    }

    /// Fails on one character
    struct BrokenGlyph(char);

    impl GlyphSource for BrokenGlyph {
        fn outline(&self, ch: char, size: f64) -> Result<BezPath, FontError> {
            if ch == self.0 {
                return Err(FontError::Draw {
                    ch,
                    reason: "bad charstring".to_string(),
                });
            }
            DistinctGlyphs.outline(ch, size)
        }
    }

    fn tester(probe: &str, max_identical: usize) -> FontValidityTester {
        FontValidityTester::new(
            probe.chars().collect::<Vec<_>>(),
            50.0,
            CanvasSpec::square(150),
            max_identical,
        )
    }

    #[test]
    fn test_distinct_glyphs_are_usable() {
        assert_eq!(tester("abcdefg", 3).check(&DistinctGlyphs), Verdict::Usable);
    }

    #[test]
    fn test_all_blank_font_is_rejected() {
        let verdict = tester("abcdefg", 3).check(&BlankGlyphs);
        assert!(!verdict.is_usable());
        assert_eq!(verdict, Verdict::DuplicateGlyphs { count: 7 });

        // too few probes to trip the duplicate rule, still blank
        let verdict = tester("ab", 3).check(&BlankGlyphs);
        assert_eq!(verdict, Verdict::BlankGlyph { ch: 'a' });
    }

    #[test]
    fn test_duplicate_glyphs_are_rejected() {
        // every letter is the same block
        let verdict = tester("abcd", 3).check(&BlockGlyphs::default());
        assert_eq!(verdict, Verdict::DuplicateGlyphs { count: 4 });

        // exactly max_identical copies is still allowed
        assert_eq!(tester("abc", 3).check(&BlockGlyphs::default()), Verdict::Usable);
    }

    #[test]
    fn test_single_blank_character_is_rejected() {
        let verdict = tester("ab c", 3).check(&DistinctGlyphs);
        assert_eq!(verdict, Verdict::Usable);

        let verdict = tester("ab c", 3).check(&BlockGlyphs::default());
        assert_eq!(verdict, Verdict::BlankGlyph { ch: ' ' });
    }

    #[test]
    fn test_render_failure_is_contained() {
        let verdict = tester("abxd", 3).check(&BrokenGlyph('x'));
        assert!(matches!(verdict, Verdict::RenderFailed { ch: 'x', .. }));
    }

    #[test]
    fn test_overflow_is_contained() {
        let tester = FontValidityTester::new(vec!['a', 'b'], 500.0, CanvasSpec::square(150), 3);
        assert_eq!(tester.check(&DistinctGlyphs), Verdict::Overflow { ch: 'a' });
    }

    #[test]
    fn test_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fake-Regular.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        assert!(matches!(tester("ab", 3).check_font(&path), Verdict::Unreadable(_)));
    }

    #[test]
    fn test_font_file_verdicts() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/BlockTest-Regular.ttf");
        assert_eq!(tester("AH", 1).check_font(&path), Verdict::Usable);
        assert_eq!(tester("AHz", 1).check_font(&path), Verdict::BlankGlyph { ch: 'z' });
    }
}
