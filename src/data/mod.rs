//! Data files consumed and produced by the pipeline
//!
//! Family metadata, usage statistics, exclusion lists, the corpus table and
//! letter frequency tables. Parsing and serialization only.

pub mod corpus_table;
pub mod exclusions;
pub mod frequencies;
pub mod metadata;
pub mod stats;
pub mod text_format;

use std::path::PathBuf;
use thiserror::Error;

// Explicit re-exports for public API
pub use corpus_table::FontCorpusRow;
pub use exclusions::{ExclusionList, ExclusionRecord};
pub use metadata::{FontFamilyMetadata, FontVariant, MetadataError};
pub use stats::UsageStats;

/// Failures reading or writing tabular data files
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("table has no '{0}' column")]
    MissingColumn(String),

    #[error("invalid usage statistics: {0}")]
    InvalidStats(String),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| DataError::Io { path, source }
    }
}
