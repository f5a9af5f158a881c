//! Fonts skipped before validity testing
//!
//! Two mechanisms: substrings that disqualify any font path containing them
//! (barcode, redaction and symbol fonts), and explicit file names from a
//! curated CSV of known bad fonts.

use super::DataError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Reason tag for fonts that are kept despite being listed
pub const OUTLINE_REASON: &str = "outline";

/// Path substrings excluded by default
pub const DEFAULT_DENYLIST: &[&str] = &[
    // bar codes
    "librebarcode",
    // letters mapped to maths symbols
    "jsMath-cmsy10",
    "jsMath-cmex10",
    // blocked-out text
    "redacted",
    "FlowCircular",
    "FlowRounded",
    "FlowBlock",
    // inverted
    "ZillaSlabHighlight",
    "Ponnala",
];

/// One row of the bad-fonts CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRecord {
    #[serde(alias = "ttf_filename")]
    pub ttf: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    denylist: Vec<String>,
    excluded_files: BTreeSet<String>,
}

impl ExclusionList {
    pub fn new(
        denylist: impl IntoIterator<Item = impl Into<String>>,
        excluded_files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            denylist: denylist.into_iter().map(Into::into).collect(),
            excluded_files: excluded_files.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in denylist with no explicit files
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied(), Vec::<String>::new())
    }

    /// Add listed files, except those tagged [`OUTLINE_REASON`]
    pub fn with_records<'a>(
        mut self,
        records: impl IntoIterator<Item = &'a ExclusionRecord>,
    ) -> Self {
        self.excluded_files.extend(
            records
                .into_iter()
                .filter(|record| record.reason != OUTLINE_REASON)
                .map(|record| record.ttf.clone()),
        );
        self
    }

    /// Read exclusion records from a CSV with `ttf` and `reason` columns
    pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ExclusionRecord>, DataError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let records = reader.deserialize().collect::<Result<Vec<ExclusionRecord>, _>>()?;
        Ok(records)
    }

    /// Whether a font should be skipped, given its full path and file name
    pub fn excludes(&self, ttf_path: &Path, filename: &str) -> bool {
        let path = ttf_path.to_string_lossy();
        self.denylist.iter().any(|needle| path.contains(needle.as_str()))
            || self.excluded_files.contains(filename)
    }
}
