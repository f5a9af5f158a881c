//! The font corpus table
//!
//! One CSV row per accepted font: `family`, `category`, `ttf_path`, then the
//! usage statistic columns in sorted order.

use super::stats::StatsRecord;
use super::DataError;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const TTF_PATH_COLUMN: &str = "ttf_path";
const FIXED_COLUMNS: [&str; 3] = ["family", "category", TTF_PATH_COLUMN];

/// One accepted font
#[derive(Debug, Clone, PartialEq)]
pub struct FontCorpusRow {
    pub family: String,
    pub category: String,
    pub ttf_path: PathBuf,
    pub stats: StatsRecord,
}

/// Sorted union of the statistic columns across rows
pub fn stat_columns(rows: &[FontCorpusRow]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.stats.keys())
        .filter(|column| !FIXED_COLUMNS.contains(&column.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Write the table as CSV
pub fn write_corpus<W: Write>(writer: W, rows: &[FontCorpusRow]) -> Result<(), DataError> {
    let columns = stat_columns(rows);
    let mut csv = csv::Writer::from_writer(writer);

    let header = FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(columns.iter().cloned());
    csv.write_record(header)?;

    for row in rows {
        let record = [
            row.family.clone(),
            row.category.clone(),
            row.ttf_path.to_string_lossy().into_owned(),
        ]
        .into_iter()
        .chain(columns.iter().map(|column| cell(row.stats.get(column))));
        csv.write_record(record)?;
    }
    csv.flush().map_err(|e| DataError::Csv(e.into()))?;
    Ok(())
}

pub fn save_corpus(path: impl AsRef<Path>, rows: &[FontCorpusRow]) -> Result<(), DataError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(DataError::io(parent))?;
    }
    let file = File::create(path).map_err(DataError::io(path))?;
    write_corpus(file, rows)
}

/// Font paths listed in a corpus table, in table order
pub fn read_ttf_paths<R: Read>(reader: R) -> Result<Vec<PathBuf>, DataError> {
    let mut csv = csv::Reader::from_reader(reader);
    let index = csv
        .headers()?
        .iter()
        .position(|h| h == TTF_PATH_COLUMN)
        .ok_or_else(|| DataError::MissingColumn(TTF_PATH_COLUMN.to_string()))?;

    let mut paths = Vec::new();
    for record in csv.records() {
        let record = record?;
        if let Some(path) = record.get(index) {
            paths.push(PathBuf::from(path));
        }
    }
    Ok(paths)
}

pub fn load_ttf_paths(path: impl AsRef<Path>) -> Result<Vec<PathBuf>, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(DataError::io(path))?;
    read_ttf_paths(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(family: &str, stats: &[(&str, Value)]) -> FontCorpusRow {
        FontCorpusRow {
            family: family.to_string(),
            category: "SERIF".to_string(),
            ttf_path: PathBuf::from(format!(
                "fonts/ofl/{}/{}-Regular.ttf",
                family.to_lowercase(),
                family
            )),
            stats: stats.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        }
    }

    #[test]
    fn test_write_uses_union_of_stat_columns() {
        let rows = vec![
            row("Alpha", &[("views", json!(10)), ("rank", json!(2))]),
            row("Beta", &[("views", json!(3)), ("trend", json!("up"))]),
        ];
        let mut buffer = Vec::new();
        write_corpus(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "family,category,ttf_path,rank,trend,views");
        assert_eq!(lines[1], "Alpha,SERIF,fonts/ofl/alpha/Alpha-Regular.ttf,2,,10");
        assert_eq!(lines[2], "Beta,SERIF,fonts/ofl/beta/Beta-Regular.ttf,,up,3");
    }

    #[test]
    fn test_paths_read_back() {
        let rows = vec![row("Alpha", &[]), row("Beta", &[])];
        let mut buffer = Vec::new();
        write_corpus(&mut buffer, &rows).unwrap();
        let paths = read_ttf_paths(buffer.as_slice()).unwrap();
        assert_eq!(paths, vec![rows[0].ttf_path.clone(), rows[1].ttf_path.clone()]);
    }

    #[test]
    fn test_missing_path_column() {
        let result = read_ttf_paths("family,category\nA,SERIF\n".as_bytes());
        assert!(matches!(result, Err(DataError::MissingColumn(_))));
    }
}
