//! Corpus assembly
//!
//! Walks a Google Fonts checkout (`<root>/<license>/<family>/`), picks the
//! regular file of each family, drops excluded and unusable fonts, and
//! joins the rest with usage statistics. One bad family never stops the
//! run: its error is logged and the family is skipped.

use crate::data::exclusions::ExclusionList;
use crate::data::metadata::METADATA_FILE_EXTENSION;
use crate::data::{FontCorpusRow, FontFamilyMetadata, MetadataError, UsageStats};
use crate::selection::{select_regular_variant, SelectionError};
use crate::validity::FontValidityTester;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const FONT_FILE_EXTENSION: &str = "ttf";

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to scan {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// A family directory with exactly one metadata file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyDir {
    pub dir: PathBuf,
    pub metadata_path: PathBuf,
}

/// The regular font chosen for a family, before validity testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCandidate {
    pub family: String,
    pub category: String,
    pub filename: String,
    pub ttf_path: PathBuf,
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let io_error = |source| CorpusError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    entries.sort();
    Ok(entries)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.is_file() && path.extension().is_some_and(|e| e == extension)
}

/// Family directories two levels below `root` that hold at least one font
/// file and exactly one metadata file, in path order.
///
/// Only an unreadable `root` is an error; unreadable group or family
/// directories are logged and skipped.
pub fn discover_family_dirs(root: &Path) -> Result<Vec<FamilyDir>, CorpusError> {
    discover_with(root, sorted_entries)
}

fn discover_with<L>(root: &Path, list: L) -> Result<Vec<FamilyDir>, CorpusError>
where
    L: Fn(&Path) -> Result<Vec<PathBuf>, CorpusError>,
{
    let list_or_skip = |dir: &Path| match list(dir) {
        Ok(entries) => Some(entries),
        Err(e) => {
            warn!("Skipping {}: {}", dir.display(), e);
            None
        }
    };

    let mut families = Vec::new();
    for group in list(root)?.into_iter().filter(|p| p.is_dir()) {
        let Some(dirs) = list_or_skip(&group) else {
            continue;
        };
        for dir in dirs.into_iter().filter(|p| p.is_dir()) {
            let Some(entries) = list_or_skip(&dir) else {
                continue;
            };
            if !entries.iter().any(|p| has_extension(p, FONT_FILE_EXTENSION)) {
                continue;
            }
            let metadata: Vec<&PathBuf> = entries
                .iter()
                .filter(|p| has_extension(p, METADATA_FILE_EXTENSION))
                .collect();
            match metadata.as_slice() {
                [only] => families.push(FamilyDir {
                    dir: dir.clone(),
                    metadata_path: (*only).clone(),
                }),
                other => debug!(
                    "Skipping {}: {} metadata files",
                    dir.display(),
                    other.len()
                ),
            }
        }
    }
    Ok(families)
}

/// Load a family's metadata and pick its regular font
pub fn load_candidate(family: &FamilyDir) -> Result<Option<FontCandidate>, CorpusError> {
    let metadata =
        FontFamilyMetadata::load(&family.metadata_path).map_err(|source| CorpusError::Metadata {
            path: family.metadata_path.clone(),
            source,
        })?;
    let Some(filename) = select_regular_variant(&metadata)? else {
        return Ok(None);
    };
    Ok(Some(FontCandidate {
        family: metadata.name,
        category: metadata.category,
        ttf_path: family.dir.join(&filename),
        filename,
    }))
}

/// Inner join on family name, sorted by family
pub fn join_usage_stats(fonts: Vec<FontCandidate>, stats: &UsageStats) -> Vec<FontCorpusRow> {
    let mut rows: Vec<FontCorpusRow> = fonts
        .into_iter()
        .filter_map(|font| {
            let record = stats.get(&font.family)?.clone();
            Some(FontCorpusRow {
                family: font.family,
                category: font.category,
                ttf_path: font.ttf_path,
                stats: record,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.family.cmp(&b.family).then_with(|| a.ttf_path.cmp(&b.ttf_path)));
    rows
}

/// Builds the font corpus table from a font tree
pub struct CorpusAssembler {
    exclusions: ExclusionList,
    tester: FontValidityTester,
}

impl CorpusAssembler {
    pub fn new(exclusions: ExclusionList, tester: FontValidityTester) -> Self {
        Self { exclusions, tester }
    }

    /// Regular fonts of every family under `root` that are not excluded
    pub fn candidates(&self, root: &Path) -> Result<Vec<FontCandidate>, CorpusError> {
        let families = discover_family_dirs(root)?;
        info!("Found {} font families under {}", families.len(), root.display());

        let mut candidates = Vec::new();
        for family in &families {
            match load_candidate(family) {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => debug!("No regular latin font in {}", family.dir.display()),
                Err(e) => warn!("Skipping {}: {}", family.dir.display(), e),
            }
        }
        info!("{} families have a regular latin font", candidates.len());

        let before = candidates.len();
        candidates.retain(|c| !self.exclusions.excludes(&c.ttf_path, &c.filename));
        info!("Excluded {} fonts by name", before - candidates.len());
        Ok(candidates)
    }

    /// Candidates that pass validity testing, tested in parallel
    pub fn usable(&self, candidates: Vec<FontCandidate>) -> Vec<FontCandidate> {
        info!(
            "Testing {} fonts on {} characters",
            candidates.len(),
            self.tester.probe().len()
        );
        let usable: Vec<FontCandidate> = candidates
            .into_par_iter()
            .filter(|c| self.tester.check_font(&c.ttf_path).is_usable())
            .collect();
        info!("{} fonts passed validity testing", usable.len());
        usable
    }

    pub fn assemble(
        &self,
        root: &Path,
        stats: &UsageStats,
    ) -> Result<Vec<FontCorpusRow>, CorpusError> {
        let candidates = self.candidates(root)?;
        let usable = self.usable(candidates);
        let rows = join_usage_stats(usable, stats);
        info!("{} fonts have usage statistics", rows.len());
        Ok(rows)
    }
}
