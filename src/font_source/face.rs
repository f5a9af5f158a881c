//! Font binaries and their variation instances

use super::{BezPathPen, FontError, GlyphSource};
use kurbo::BezPath;
use skrifa::instance::{Location, LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlineGlyphCollection};
use skrifa::{charmap::Charmap, FontRef, MetadataProvider};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A font file held in memory
pub struct FontFace {
    path: PathBuf,
    data: Vec<u8>,
}

impl FontFace {
    /// Read and validate a font file (the first face of a collection).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref().to_path_buf();
        let data = fs::read(&path).map_err(|source| FontError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_bytes(path, data)
    }

    /// Wrap font bytes that were loaded elsewhere
    pub fn from_bytes(path: PathBuf, data: Vec<u8>) -> Result<Self, FontError> {
        let face = Self { path, data };
        face.font_ref()?;
        Ok(face)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn font_ref(&self) -> Result<FontRef<'_>, FontError> {
        FontRef::from_index(&self.data, 0).map_err(|e| FontError::Unreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Names of the variation instances defined in the font's `fvar` table
    pub fn named_variations(&self) -> Result<Vec<String>, FontError> {
        let font = self.font_ref()?;
        Ok(font
            .named_instances()
            .iter()
            .filter_map(|instance| {
                font.localized_strings(instance.subfamily_name_id())
                    .english_or_first()
                    .map(|name| name.to_string())
            })
            .collect())
    }

    /// Select a named variation, falling back to the default instance.
    ///
    /// A font without variations, or without an instance called `variation`,
    /// is not an error: a warning is logged and the default instance is used.
    pub fn instance(&self, variation: Option<&str>) -> Result<FontInstance<'_>, FontError> {
        let font = self.font_ref()?;
        let location = match variation {
            Some(name) => self.named_location(&font, name),
            None => None,
        }
        .unwrap_or_else(|| Location::new(font.axes().len()));

        Ok(FontInstance {
            charmap: font.charmap(),
            outlines: font.outline_glyphs(),
            location,
            path: &self.path,
        })
    }

    fn named_location(&self, font: &FontRef<'_>, name: &str) -> Option<Location> {
        let instances = font.named_instances();
        if instances.is_empty() {
            warn!(
                "{} has no named variations, cannot select '{}'; using default instance",
                self.path.display(),
                name
            );
            return None;
        }

        let found = instances.iter().find(|instance| {
            font.localized_strings(instance.subfamily_name_id())
                .english_or_first()
                .is_some_and(|s| s.to_string() == name)
        });
        if found.is_none() {
            let available = self.named_variations().unwrap_or_default();
            warn!(
                "{} does not define variation '{}' (has {}); using default instance",
                self.path.display(),
                name,
                available.join(", ")
            );
        }
        found.map(|instance| instance.location())
    }
}

/// A font fixed at one point in its design space
pub struct FontInstance<'a> {
    charmap: Charmap<'a>,
    outlines: OutlineGlyphCollection<'a>,
    location: Location,
    path: &'a Path,
}

impl GlyphSource for FontInstance<'_> {
    fn outline(&self, ch: char, size: f64) -> Result<BezPath, FontError> {
        let Some(glyph_id) = self.charmap.map(ch) else {
            debug!("{} has no glyph for '{}'", self.path.display(), ch);
            return Ok(BezPath::new());
        };
        let Some(glyph) = self.outlines.get(glyph_id) else {
            debug!("{} has no outline for '{}'", self.path.display(), ch);
            return Ok(BezPath::new());
        };

        let settings = DrawSettings::unhinted(
            Size::new(size as f32),
            LocationRef::new(self.location.coords()),
        );
        let mut pen = BezPathPen::new();
        glyph
            .draw(settings, &mut pen)
            .map_err(|e| FontError::Draw {
                ch,
                reason: e.to_string(),
            })?;
        Ok(pen.finish())
    }
}
