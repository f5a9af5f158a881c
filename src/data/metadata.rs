//! Font family metadata (`METADATA.pb`)
//!
//! Google Fonts describes each family in a protocol buffer text file. Only
//! the fields needed to pick a regular font are kept; everything else in
//! the file is skipped so newer metadata keeps loading.

use super::text_format::{self, Message, TextFormatError, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of the per-family metadata file
pub const METADATA_FILE_EXTENSION: &str = "pb";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed metadata: {0}")]
    Syntax(#[from] TextFormatError),

    #[error("metadata has no '{field}' field")]
    MissingField { field: &'static str },

    #[error("metadata field '{field}' has invalid value {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// One style/weight file of a family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontVariant {
    pub filename: String,
    pub style: String,
    pub weight: i32,
}

/// Normalized family record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamilyMetadata {
    pub name: String,
    pub category: String,
    pub supported_subsets: BTreeSet<String>,
    pub variants: Vec<FontVariant>,
}

impl FontFamilyMetadata {
    /// Load a metadata file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse metadata text, ignoring fields this crate does not use
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let document = text_format::parse(text)?;

        let name = required_scalar(&document, "name")?;
        let category = optional_scalar(&document, "category")?.unwrap_or_default();
        let supported_subsets = document
            .values("subsets")
            .map(|value| scalar(value, "subsets"))
            .collect::<Result<_, _>>()?;
        let variants = document
            .values("fonts")
            .map(|value| match value {
                Value::Message(font) => FontVariant::from_message(font),
                Value::Scalar(s) => Err(MetadataError::InvalidValue {
                    field: "fonts",
                    value: s.clone(),
                }),
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            name,
            category,
            supported_subsets,
            variants,
        })
    }

    pub fn supports_subset(&self, subset: &str) -> bool {
        self.supported_subsets.contains(subset)
    }
}

impl FontVariant {
    fn from_message(font: &Message) -> Result<Self, MetadataError> {
        let filename = required_scalar(font, "filename")?;
        let style = optional_scalar(font, "style")?.unwrap_or_default();
        let weight = match optional_scalar(font, "weight")? {
            Some(raw) => raw.parse().map_err(|_| MetadataError::InvalidValue {
                field: "weight",
                value: raw,
            })?,
            None => 0,
        };
        Ok(Self {
            filename,
            style,
            weight,
        })
    }
}

fn scalar(value: &Value, field: &'static str) -> Result<String, MetadataError> {
    match value {
        Value::Scalar(s) => Ok(s.clone()),
        Value::Message(_) => Err(MetadataError::InvalidValue {
            field,
            value: "<message>".to_string(),
        }),
    }
}

fn optional_scalar(
    message: &Message,
    field: &'static str,
) -> Result<Option<String>, MetadataError> {
    message.first(field).map(|value| scalar(value, field)).transpose()
}

fn required_scalar(message: &Message, field: &'static str) -> Result<String, MetadataError> {
    optional_scalar(message, field)?.ok_or(MetadataError::MissingField { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROBOTO_FLEX: &str = r#"
name: "Roboto Flex"
designer: "Font Bureau"
license: "OFL"
category: "SANS_SERIF"
date_added: "2022-02-09"
fonts {
  name: "Roboto Flex"
  style: "normal"
  weight: 400
  filename: "RobotoFlex[GRAD,XOPQ,XTRA,YOPQ,YTAS,YTDE,YTFI,YTLC,YTUC,opsz,slnt,wdth,wght].ttf"
  post_script_name: "RobotoFlex-Regular"
  full_name: "Roboto Flex"
  copyright: "Copyright 2017 The Roboto Flex Project Authors"
}
subsets: "cyrillic"
subsets: "latin"
subsets: "menu"
axes {
  tag: "wght"
  min_value: 100.0
  max_value: 1000.0
}
source {
  repository_url: "https://github.com/googlefonts/roboto-flex"
  files {
    source_file: "OFL.txt"
    dest_file: "OFL.txt"
  }
}
"#;

    #[test]
    fn test_parse_family() {
        let metadata = FontFamilyMetadata::parse(ROBOTO_FLEX).unwrap();
        assert_eq!(metadata.name, "Roboto Flex");
        assert_eq!(metadata.category, "SANS_SERIF");
        assert!(metadata.supports_subset("latin"));
        assert_eq!(metadata.supported_subsets.len(), 3);
        assert_eq!(metadata.variants.len(), 1);
        assert_eq!(metadata.variants[0].style, "normal");
        assert_eq!(metadata.variants[0].weight, 400);
        assert!(metadata.variants[0].filename.starts_with("RobotoFlex["));
    }

    #[test]
    fn test_variant_order_is_kept() {
        let text = r#"
            name: "Lora"
            fonts { style: "normal" weight: 400 filename: "Lora-Regular.ttf" }
            fonts { style: "italic" weight: 400 filename: "Lora-Italic.ttf" }
            fonts { style: "normal" weight: 700 filename: "Lora-Bold.ttf" }
        "#;
        let metadata = FontFamilyMetadata::parse(text).unwrap();
        let files: Vec<_> = metadata.variants.iter().map(|v| v.filename.as_str()).collect();
        assert_eq!(files, ["Lora-Regular.ttf", "Lora-Italic.ttf", "Lora-Bold.ttf"]);
        assert!(metadata.supported_subsets.is_empty());
        assert_eq!(metadata.category, "");
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let result = FontFamilyMetadata::parse("category: \"SERIF\"");
        assert!(matches!(result, Err(MetadataError::MissingField { field: "name" })));
    }

    #[test]
    fn test_bad_weight_is_an_error() {
        let text = r#"name: "X" fonts { filename: "X.ttf" weight: heavy }"#;
        assert!(matches!(
            FontFamilyMetadata::parse(text),
            Err(MetadataError::InvalidValue { field: "weight", .. })
        ));
    }

    #[test]
    fn test_structurally_malformed_is_syntax_error() {
        let text = "name: \"X\"\nfonts {\n  filename: \"X.ttf\"\n";
        assert!(matches!(
            FontFamilyMetadata::parse(text),
            Err(MetadataError::Syntax(_))
        ));
    }
}
