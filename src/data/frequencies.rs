//! Letter frequencies from a word frequency list
//!
//! Each letter counts once per occurrence in a word, weighted by how often
//! that word occurs. Used to weight letters when drawing training batches.

use super::DataError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const WORD_COLUMN: &str = "Word";
pub const COUNT_COLUMN: &str = "WFfreqcount";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterFrequency {
    pub letter: char,
    /// Frequency-weighted occurrence count
    pub n: f64,
    /// Share of all counted letters
    pub p: f64,
}

#[derive(Debug, Deserialize)]
struct WordRow {
    #[serde(rename = "Word")]
    word: String,
    #[serde(rename = "WFfreqcount")]
    count: f64,
}

/// Weighted counts for `letters`, in the order given
pub fn letter_frequencies<'a>(
    words: impl IntoIterator<Item = (&'a str, f64)>,
    letters: &[char],
) -> Vec<LetterFrequency> {
    let mut counts: HashMap<char, f64> = letters.iter().map(|&c| (c, 0.0)).collect();
    for (word, weight) in words {
        for ch in word.chars() {
            if let Some(count) = counts.get_mut(&ch) {
                *count += weight;
            }
        }
    }

    let total: f64 = counts.values().sum();
    letters
        .iter()
        .map(|&letter| {
            let n = counts[&letter];
            LetterFrequency {
                letter,
                n,
                p: if total > 0.0 { n / total } else { 0.0 },
            }
        })
        .collect()
}

/// Read `(word, count)` pairs from a CSV with `Word` and `WFfreqcount` columns
pub fn read_word_counts<R: Read>(reader: R) -> Result<Vec<(String, f64)>, DataError> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers()?.clone();
    for column in [WORD_COLUMN, COUNT_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column.to_string()));
        }
    }
    csv.deserialize()
        .map(|row| {
            let row: WordRow = row?;
            Ok((row.word, row.count))
        })
        .collect()
}

pub fn load_word_counts(path: impl AsRef<Path>) -> Result<Vec<(String, f64)>, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(DataError::io(path))?;
    read_word_counts(file)
}

pub fn write_letter_frequencies<W: Write>(
    writer: W,
    frequencies: &[LetterFrequency],
) -> Result<(), DataError> {
    let mut csv = csv::Writer::from_writer(writer);
    for frequency in frequencies {
        csv.serialize(frequency)?;
    }
    csv.flush().map_err(|e| DataError::Csv(e.into()))?;
    Ok(())
}

pub fn save_letter_frequencies(
    path: impl AsRef<Path>,
    frequencies: &[LetterFrequency],
) -> Result<(), DataError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(DataError::io(parent))?;
    }
    let file = File::create(path).map_err(DataError::io(path))?;
    write_letter_frequencies(file, frequencies)
}
