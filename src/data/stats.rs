//! Per-family usage statistics
//!
//! Loaded from the Google Fonts analytics archive (`stats.json`). Both a
//! list of records and a column-oriented object are accepted.

use super::DataError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Key column shared with the font table
pub const FAMILY_COLUMN: &str = "family";

/// Statistic columns for one family
pub type StatsRecord = BTreeMap<String, Value>;

/// Usage statistics keyed by family name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageStats {
    rows: BTreeMap<String, StatsRecord>,
}

impl UsageStats {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(DataError::io(path))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, DataError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Array(records) => Self::from_records(records),
            Value::Object(columns) => Self::from_columns(columns),
            other => Err(DataError::InvalidStats(format!(
                "expected an array or object, found {other}"
            ))),
        }
    }

    /// `[{"family": "A", "views": 1}, ...]`
    fn from_records(records: Vec<Value>) -> Result<Self, DataError> {
        let mut stats = Self::default();
        for record in records {
            match record {
                Value::Object(fields) => stats.insert_fields(fields)?,
                other => {
                    return Err(DataError::InvalidStats(format!(
                        "expected an object per family, found {other}"
                    )))
                }
            }
        }
        Ok(stats)
    }

    /// `{"family": {"0": "A"}, "views": {"0": 1}}` or with arrays per column
    fn from_columns(columns: Map<String, Value>) -> Result<Self, DataError> {
        let mut records: BTreeMap<String, Map<String, Value>> = BTreeMap::new();
        for (column, cells) in columns {
            let cells: Vec<(String, Value)> = match cells {
                Value::Object(cells) => cells.into_iter().collect(),
                Value::Array(cells) => cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, cell)| (format!("{i:012}"), cell))
                    .collect(),
                other => {
                    return Err(DataError::InvalidStats(format!(
                        "column '{column}' is not an array or object: {other}"
                    )))
                }
            };
            for (row, cell) in cells {
                records.entry(row).or_default().insert(column.clone(), cell);
            }
        }

        let mut stats = Self::default();
        for fields in records.into_values() {
            stats.insert_fields(fields)?;
        }
        Ok(stats)
    }

    fn insert_fields(&mut self, mut fields: Map<String, Value>) -> Result<(), DataError> {
        let family = match fields.remove(FAMILY_COLUMN) {
            Some(Value::String(family)) => family,
            other => {
                return Err(DataError::InvalidStats(format!(
                    "record without a string '{FAMILY_COLUMN}': {other:?}"
                )))
            }
        };
        if self.rows.contains_key(&family) {
            warn!("Duplicate usage statistics for '{}', keeping the first", family);
            return Ok(());
        }
        self.rows.insert(family, fields.into_iter().collect());
        Ok(())
    }

    pub fn insert(&mut self, family: impl Into<String>, record: StatsRecord) {
        self.rows.entry(family.into()).or_insert(record);
    }

    pub fn get(&self, family: &str) -> Option<&StatsRecord> {
        self.rows.get(family)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }
}

impl FromIterator<(String, StatsRecord)> for UsageStats {
    fn from_iter<I: IntoIterator<Item = (String, StatsRecord)>>(iter: I) -> Self {
        let mut stats = Self::default();
        for (family, record) in iter {
            stats.insert(family, record);
        }
        stats
    }
}
