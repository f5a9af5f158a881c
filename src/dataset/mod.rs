//! Dataset generation
//!
//! Renders `samples_per_font` images of every configured letter in every
//! corpus font. Each (letter, font) unit gets its own RNG seeded from the
//! global seed and the unit's indices, so the output does not depend on
//! how rayon schedules the work.

pub mod naming;

use crate::core::settings::GenerationSettings;
use crate::font_source::{FontError, FontFace, GlyphSource};
use crate::placement::{
    placement_range, round_to, sample_placement, PlacementError, PLACEMENT_DECIMALS,
};
use crate::rendering::{rasterize, RenderError, RenderRequest, REGULAR_VARIATION};
use image::ImageFormat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub use naming::{letter_dir_name, sample_file_name};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("cannot write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid generation settings: {0}")]
    InvalidSettings(String),
}

impl DatasetError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Seed for one (letter, font) unit
pub fn unit_seed(seed: u64, letter_index: usize, font_index: usize) -> u64 {
    seed.wrapping_add(((letter_index as u64) << 32) | font_index as u64)
}

fn sample_in<R: Rng>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    round_to(rng.gen_range(min..=max), PLACEMENT_DECIMALS)
}

pub struct DatasetGenerator {
    settings: GenerationSettings,
    letters: Vec<char>,
    output_dir: PathBuf,
}

impl DatasetGenerator {
    pub fn new(
        settings: GenerationSettings,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, DatasetError> {
        settings.validate().map_err(DatasetError::InvalidSettings)?;
        Ok(Self {
            letters: settings.letters(),
            settings,
            output_dir: output_dir.into(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Recreate the output directory with one empty folder per letter
    pub fn prepare_output(&self) -> Result<(), DatasetError> {
        if self.output_dir.exists() {
            info!("Removing existing output directory {}", self.output_dir.display());
            fs::remove_dir_all(&self.output_dir).map_err(DatasetError::io(&self.output_dir))?;
        }
        for &letter in &self.letters {
            let dir = self.output_dir.join(letter_dir_name(letter));
            fs::create_dir_all(&dir).map_err(DatasetError::io(&dir))?;
        }
        Ok(())
    }

    /// Render the whole dataset, returning the number of images written.
    ///
    /// The first fit or overflow failure stops the run.
    pub fn generate(&self, fonts: &[PathBuf]) -> Result<usize, DatasetError> {
        self.prepare_output()?;
        info!(
            "Rendering {} letters x {} fonts x {} samples into {}",
            self.letters.len(),
            fonts.len(),
            self.settings.samples_per_font,
            self.output_dir.display()
        );

        let written = fonts
            .par_iter()
            .enumerate()
            .map(|(font_index, path)| {
                let face = FontFace::open(path)?;
                let instance = face.instance(Some(REGULAR_VARIATION))?;
                self.generate_font(&instance, path, font_index)
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))?;

        info!("Wrote {written} images");
        Ok(written)
    }

    /// Render every letter for one font
    pub fn generate_font(
        &self,
        source: &impl GlyphSource,
        font_path: &Path,
        font_index: usize,
    ) -> Result<usize, DatasetError> {
        self.check_size_range(source)?;
        let mut written = 0;
        for (letter_index, &letter) in self.letters.iter().enumerate() {
            let seed = unit_seed(self.settings.seed, letter_index, font_index);
            let mut rng = StdRng::seed_from_u64(seed);
            written += self.generate_pair(&mut rng, source, font_path, letter)?.len();
        }
        debug!("Finished {}", font_path.display());
        Ok(written)
    }

    /// The largest size must fit every letter upright
    fn check_size_range(&self, source: &impl GlyphSource) -> Result<(), DatasetError> {
        let (_, max_size) = self.settings.effective_size_range();
        for &letter in &self.letters {
            placement_range(source, letter, max_size, 0.0, &self.settings.canvas)?;
        }
        Ok(())
    }

    /// Render and save the samples for one (letter, font) unit
    pub fn generate_pair<R: Rng>(
        &self,
        rng: &mut R,
        source: &impl GlyphSource,
        font_path: &Path,
        letter: char,
    ) -> Result<Vec<PathBuf>, DatasetError> {
        let n = self.settings.samples_per_font;
        let rotations: Vec<f64> = (0..n)
            .map(|_| sample_in(rng, self.settings.rotation_range))
            .collect();
        let sizes: Vec<f64> = (0..n)
            .map(|_| sample_in(rng, self.settings.effective_size_range()))
            .collect();

        let dir = self.output_dir.join(letter_dir_name(letter));
        let mut paths = Vec::with_capacity(n);
        for (&rotation, &size) in rotations.iter().zip(&sizes) {
            let canvas = &self.settings.canvas;
            let sample = sample_placement(rng, source, letter, size, rotation, canvas)?;
            let request = RenderRequest {
                ch: letter,
                size: sample.size,
                x: sample.x,
                y: sample.y,
                rotation: sample.rotation_degrees,
                canvas: self.settings.canvas,
            };
            let image = rasterize(source, &request)?;

            let path = dir.join(sample_file_name(font_path, &sample));
            image
                .save_with_format(&path, ImageFormat::Png)
                .map_err(|source| DatasetError::Image {
                    path: path.clone(),
                    source,
                })?;
            paths.push(path);
        }
        Ok(paths)
    }
}
