//! Pipeline settings and their built-in defaults

use crate::data::exclusions::DEFAULT_DENYLIST;
use crate::geometry::CanvasSpec;
use serde::{Deserialize, Serialize};

/// ASCII letters followed by the German umlauts and sharp s
pub const DEFAULT_LETTERS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZäöüÄÖÜß";

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 25102025;

/// Settings for rendering the image dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Seeds every random draw; same seed and inputs give identical output
    pub seed: u64,
    pub canvas: CanvasSpec,
    /// Images per (letter, font) pair
    pub samples_per_font: usize,
    /// Degrees, inclusive
    pub rotation_range: (f64, f64),
    /// Pixels per em; defaults to 12 up to half the larger canvas side
    pub size_range: Option<(f64, f64)>,
    pub letters: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            canvas: CanvasSpec::square(256),
            samples_per_font: 8,
            rotation_range: (-15.0, 15.0),
            size_range: None,
            letters: DEFAULT_LETTERS.to_string(),
        }
    }
}

impl GenerationSettings {
    pub fn letters(&self) -> Vec<char> {
        self.letters.chars().collect()
    }

    /// Configured size range, or `12..=max(width, height) / 2`
    pub fn effective_size_range(&self) -> (f64, f64) {
        self.size_range.unwrap_or_else(|| {
            let largest = self.canvas.width.max(self.canvas.height);
            (12.0, 0.5 * f64::from(largest))
        })
    }

    /// Check ranges before any work starts
    pub fn validate(&self) -> Result<(), String> {
        let (size_min, size_max) = self.effective_size_range();
        if !(size_min > 0.0 && size_min <= size_max) {
            return Err(format!("Invalid size range: {size_min}..{size_max}"));
        }
        let (rot_min, rot_max) = self.rotation_range;
        if !(rot_min <= rot_max) {
            return Err(format!("Invalid rotation range: {rot_min}..{rot_max}"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err("Canvas must not be empty".to_string());
        }
        if self.letters.is_empty() {
            return Err("No letters configured".to_string());
        }
        Ok(())
    }
}

/// Settings for assembling the font corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// Pixels per em for probe renders
    pub probe_size: f64,
    /// Probe canvas side as a multiple of `probe_size`
    pub canvas_size_factor: f64,
    /// Most probe characters allowed to share one raster
    pub max_identical: usize,
    pub probe_letters: String,
    /// Font paths containing any of these are skipped before testing
    pub denylist: Vec<String>,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            probe_size: 50.0,
            canvas_size_factor: 3.0,
            max_identical: 3,
            probe_letters: DEFAULT_LETTERS.to_string(),
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CorpusSettings {
    /// Square probe canvas of `round(probe_size * canvas_size_factor)`
    pub fn probe_canvas(&self) -> CanvasSpec {
        CanvasSpec::square((self.probe_size * self.canvas_size_factor).round() as u32)
    }

    pub fn probe_letters(&self) -> Vec<char> {
        self.probe_letters.chars().collect()
    }
}
