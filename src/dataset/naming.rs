//! Output layout for generated images
//!
//! One directory per letter and case (`a_lwr`, `A_upr`), one file per
//! sample, named after the font and the exact draw parameters.

use crate::placement::PlacementSample;
use std::path::Path;

/// Directory name for a letter, tagged with its case
pub fn letter_dir_name(letter: char) -> String {
    let case = if letter.is_lowercase() { "lwr" } else { "upr" };
    format!("{letter}_{case}")
}

/// Whole numbers keep one decimal place so names stay unambiguous
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// File name (with `.png`) for one sample.
///
/// Dots in the font stem become `-`, then every remaining dot becomes `p`.
pub fn sample_file_name(font_path: &Path, sample: &PlacementSample) -> String {
    let stem = font_path
        .file_stem()
        .map(|s| s.to_string_lossy().replace('.', "-"))
        .unwrap_or_default();
    let name = format!(
        "font-{stem}_x{}_y{}_sz{}_rot{}",
        format_value(sample.x),
        format_value(sample.y),
        format_value(sample.size),
        format_value(sample.rotation_degrees),
    );
    format!("{}.png", name.replace('.', "p"))
}
