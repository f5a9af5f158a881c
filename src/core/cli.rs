//! Command line interface for glyphcorpus
//!
//! Handles parsing command line arguments and provides validation for user
//! inputs. Flags override values from the settings file, which override the
//! built-in defaults.

use crate::core::settings::{CorpusSettings, GenerationSettings};
use crate::geometry::CanvasSpec;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// glyphcorpus CLI arguments
///
/// Examples:
///   glyphcorpus corpus --fonts ~/fonts/ofl --stats stats.json --output corpus.csv
///   glyphcorpus generate --corpus corpus.csv --output dataset/
///   glyphcorpus generate --corpus corpus.csv --output dataset/ --seed 7 --samples 16
///   glyphcorpus letter-freqs --words SUBTLEX-DE.csv --output letter_freqs.csv
///   glyphcorpus --new-config
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "glyphcorpus",
    version,
    about = "Curates usable fonts and renders labelled letter images",
    long_about = "glyphcorpus assembles a corpus of fonts whose Regular style renders every letter distinctly, then renders randomly sized, rotated and placed letter images from that corpus for training recognition models."
)]
pub struct CliArgs {
    /// Settings file to use instead of ~/.config/glyphcorpus/settings.json
    #[clap(long = "config", global = true, help = "Settings file (JSON)")]
    pub config: Option<PathBuf>,

    /// Also write logs to a daily file in this directory
    #[clap(long = "log-dir", global = true, help = "Directory for daily log files")]
    pub log_dir: Option<PathBuf>,

    /// Write a settings file with the built-in defaults and exit
    #[clap(
        long = "new-config",
        help = "Write a settings file with default values",
        long_help = "Write the built-in defaults to the settings file (the --config path, or ~/.config/glyphcorpus/settings.json) so they can be edited. An existing file is left untouched."
    )]
    pub new_config: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Assemble the font corpus table
    Corpus(CorpusArgs),
    /// Render the letter image dataset from a corpus table
    Generate(GenerateArgs),
    /// Compute letter frequencies from a word frequency list
    LetterFreqs(LetterFreqArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Root of the font tree, laid out as <license>/<family>/*.ttf
    #[clap(long = "fonts", short = 'f')]
    pub fonts_dir: PathBuf,

    /// Usage statistics JSON keyed by family name
    #[clap(long = "stats", short = 's')]
    pub stats: PathBuf,

    /// CSV of font files to skip (columns ttf, reason)
    #[clap(long = "exclusions")]
    pub exclusions: Option<PathBuf>,

    /// Where to write the corpus CSV
    #[clap(long = "output", short = 'o')]
    pub output: PathBuf,

    /// Pixels per em for probe renders
    #[clap(long = "probe-size")]
    pub probe_size: Option<f64>,

    /// Most probe letters allowed to render identically
    #[clap(long = "max-identical")]
    pub max_identical: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Corpus CSV with a ttf_path column
    #[clap(long = "corpus", short = 'c')]
    pub corpus: PathBuf,

    /// Output directory; recreated if it exists
    #[clap(long = "output", short = 'o')]
    pub output: PathBuf,

    #[clap(long = "seed")]
    pub seed: Option<u64>,

    /// Images per letter and font
    #[clap(long = "samples", short = 'n')]
    pub samples: Option<usize>,

    /// Square canvas side in pixels
    #[clap(long = "canvas-size")]
    pub canvas_size: Option<u32>,

    #[clap(long = "rotation-min", allow_hyphen_values = true)]
    pub rotation_min: Option<f64>,

    #[clap(long = "rotation-max", allow_hyphen_values = true)]
    pub rotation_max: Option<f64>,

    #[clap(long = "size-min")]
    pub size_min: Option<f64>,

    #[clap(long = "size-max")]
    pub size_max: Option<f64>,

    /// Letters to render, as one string
    #[clap(long = "letters")]
    pub letters: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LetterFreqArgs {
    /// Word frequency CSV with Word and WFfreqcount columns
    #[clap(long = "words", short = 'w')]
    pub words: PathBuf,

    /// Where to write the letter,n,p CSV
    #[clap(long = "output", short = 'o')]
    pub output: PathBuf,

    #[clap(long = "letters")]
    pub letters: Option<String>,
}

fn require_exists(path: &Path, what: &str) -> Result<(), String> {
    if path.exists() {
        Ok(())
    } else {
        Err(format!(
            "{what} does not exist: {}\nMake sure the path is correct and the file exists.",
            path.display()
        ))
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// Checks that input paths exist before any work starts.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(config) = &self.config {
            if !self.new_config {
                require_exists(config, "Settings file")?;
            }
        }
        match &self.command {
            Some(Command::Corpus(args)) => {
                require_exists(&args.fonts_dir, "Font directory")?;
                require_exists(&args.stats, "Stats file")?;
                if let Some(exclusions) = &args.exclusions {
                    require_exists(exclusions, "Exclusion list")?;
                }
            }
            Some(Command::Generate(args)) => require_exists(&args.corpus, "Corpus table")?,
            Some(Command::LetterFreqs(args)) => require_exists(&args.words, "Word list")?,
            None if self.new_config => {}
            None => {
                return Err(
                    "No command given. Use one of: corpus, generate, letter-freqs".to_string(),
                )
            }
        }
        Ok(())
    }
}

impl CorpusArgs {
    pub fn apply(&self, settings: &mut CorpusSettings) {
        if let Some(size) = self.probe_size {
            settings.probe_size = size;
        }
        if let Some(max) = self.max_identical {
            settings.max_identical = max;
        }
    }
}

impl GenerateArgs {
    pub fn apply(&self, settings: &mut GenerationSettings) {
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_font = samples;
        }
        if let Some(side) = self.canvas_size {
            settings.canvas = CanvasSpec::square(side);
        }
        if let Some(min) = self.rotation_min {
            settings.rotation_range.0 = min;
        }
        if let Some(max) = self.rotation_max {
            settings.rotation_range.1 = max;
        }
        if self.size_min.is_some() || self.size_max.is_some() {
            let (min, max) = settings.effective_size_range();
            settings.size_range =
                Some((self.size_min.unwrap_or(min), self.size_max.unwrap_or(max)));
        }
        if let Some(letters) = &self.letters {
            settings.letters = letters.clone();
        }
    }
}
