//! Regular variant selection
//!
//! Picks the one upright, weight-400 file of a family. Families that do not
//! cover Latin, or have no such file, yield `None`. A tie that the
//! `-Regular.` file name rule cannot break is an error rather than a guess.

use crate::data::{FontFamilyMetadata, FontVariant};
use thiserror::Error;

/// Subset a family must support to be considered
pub const REQUIRED_SUBSET: &str = "latin";
pub const REGULAR_STYLE: &str = "normal";
pub const REGULAR_WEIGHT: i32 = 400;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("expected 1 regular font file in {family}, but there were {count}")]
    AmbiguousVariant { family: String, count: usize },
}

/// File name of the chosen regular variant, if any
pub type VariantSelection = Option<String>;

fn is_regular(variant: &FontVariant) -> bool {
    variant.style == REGULAR_STYLE && variant.weight == REGULAR_WEIGHT
}

/// Whether a file name looks like `<stem>-Regular.<extension>`.
///
/// Only the last extension counts, so `Foo-Regular.v2.ttf` does not match.
pub fn has_regular_suffix(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(stem, extension)| stem.ends_with("-Regular") && !extension.is_empty())
}

/// Choose the regular file of a family.
pub fn select_regular_variant(
    metadata: &FontFamilyMetadata,
) -> Result<VariantSelection, SelectionError> {
    if !metadata.supports_subset(REQUIRED_SUBSET) {
        return Ok(None);
    }

    let mut candidates: Vec<&str> = metadata
        .variants
        .iter()
        .filter(|variant| is_regular(variant))
        .map(|variant| variant.filename.as_str())
        .collect();

    if candidates.len() > 1 {
        let suffixed: Vec<&str> = candidates
            .iter()
            .copied()
            .filter(|filename| has_regular_suffix(filename))
            .collect();
        if suffixed.len() == 1 {
            candidates = suffixed;
        }
    }

    match candidates.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(only.to_string())),
        _ => Err(SelectionError::AmbiguousVariant {
            family: metadata.name.clone(),
            count: candidates.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(filename: &str, style: &str, weight: i32) -> FontVariant {
        FontVariant {
            filename: filename.to_string(),
            style: style.to_string(),
            weight,
        }
    }

    fn family(subsets: &[&str], variants: Vec<FontVariant>) -> FontFamilyMetadata {
        FontFamilyMetadata {
            name: "Test Family".to_string(),
            category: "SANS_SERIF".to_string(),
            supported_subsets: subsets.iter().map(|s| s.to_string()).collect(),
            variants,
        }
    }

    #[test]
    fn test_single_regular_is_selected() {
        let metadata = family(
            &["latin", "latin-ext"],
            vec![
                variant("Test-Regular.ttf", "normal", 400),
                variant("Test-Bold.ttf", "normal", 700),
                variant("Test-Italic.ttf", "italic", 400),
            ],
        );
        assert_eq!(
            select_regular_variant(&metadata),
            Ok(Some("Test-Regular.ttf".to_string()))
        );
    }

    #[test]
    fn test_non_latin_family_is_skipped() {
        let metadata = family(&["cyrillic"], vec![variant("Test-Regular.ttf", "normal", 400)]);
        assert_eq!(select_regular_variant(&metadata), Ok(None));
    }

    #[test]
    fn test_no_regular_weight() {
        let metadata = family(
            &["latin"],
            vec![
                variant("Test-Light.ttf", "normal", 300),
                variant("Test-Italic.ttf", "italic", 400),
            ],
        );
        assert_eq!(select_regular_variant(&metadata), Ok(None));
    }

    #[test]
    fn test_regular_suffix_breaks_tie() {
        let metadata = family(
            &["latin"],
            vec![
                variant("TestDisplay.ttf", "normal", 400),
                variant("Test-Regular.ttf", "normal", 400),
            ],
        );
        let first = select_regular_variant(&metadata);
        assert_eq!(first, Ok(Some("Test-Regular.ttf".to_string())));
        assert_eq!(select_regular_variant(&metadata), first);
    }

    #[test]
    fn test_tie_without_suffix_is_ambiguous() {
        let metadata = family(
            &["latin"],
            vec![
                variant("Test[wght].ttf", "normal", 400),
                variant("TestText.ttf", "normal", 400),
            ],
        );
        assert_eq!(
            select_regular_variant(&metadata),
            Err(SelectionError::AmbiguousVariant {
                family: "Test Family".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_tie_with_two_suffixes_is_ambiguous() {
        let metadata = family(
            &["latin"],
            vec![
                variant("TestA-Regular.ttf", "normal", 400),
                variant("TestB-Regular.otf", "normal", 400),
            ],
        );
        assert!(matches!(
            select_regular_variant(&metadata),
            Err(SelectionError::AmbiguousVariant { count: 2, .. })
        ));
    }

    #[test]
    fn test_regular_suffix_pattern() {
        assert!(has_regular_suffix("Lora-Regular.ttf"));
        assert!(!has_regular_suffix("Lora-Regular"));
        assert!(!has_regular_suffix("Lora-Regular."));
        assert!(!has_regular_suffix("LoraRegular.ttf"));
        assert!(!has_regular_suffix("Lora-RegularItalic.ttf"));
        assert!(!has_regular_suffix("Lora-Regular.v2.ttf"));
    }
}
