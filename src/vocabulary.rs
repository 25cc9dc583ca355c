//! Label vocabulary loading.
//!
//! The vocabulary is the ordered label list that defines YOLO label indices.
//! Two file shapes are read:
//!
//! - `classes.txt`: one label per line.
//! - YOLO `data.yaml`: a `names:` key holding either a list or an
//!   index → name map.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::BoxerError;

/// Reads a vocabulary, choosing the parser by file extension.
///
/// `.yaml` and `.yml` files are read as `data.yaml`; anything else as
/// `classes.txt`.
pub fn read_vocabulary(path: &Path) -> Result<Vec<String>, BoxerError> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let labels = if is_yaml {
        read_data_yaml_names(path)?
    } else {
        read_classes_txt(path)?
    };
    log::debug!("read {} labels from {}", labels.len(), path.display());
    Ok(labels)
}

/// Reads one trimmed label per line. A trailing newline is fine; an empty
/// line anywhere else is an error.
pub fn read_classes_txt(path: &Path) -> Result<Vec<String>, BoxerError> {
    let data = fs::read_to_string(path)?;
    parse_classes_txt(&data).map_err(|message| BoxerError::VocabularyParse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_classes_txt(data: &str) -> Result<Vec<String>, String> {
    let mut labels = Vec::new();

    for (line_idx, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(format!("line {} is empty", line_idx + 1));
        }
        labels.push(trimmed.to_string());
    }

    Ok(labels)
}

const MAX_CLASS_INDEX: usize = u16::MAX as usize;

#[derive(Debug, Deserialize)]
struct DataYaml {
    names: DataYamlNames,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataYamlNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<usize, String>),
}

/// Reads the `names:` key of a YOLO `data.yaml`.
///
/// Gaps in an index map are filled with `class_<index>`.
pub fn read_data_yaml_names(path: &Path) -> Result<Vec<String>, BoxerError> {
    let data = fs::read_to_string(path)?;
    parse_data_yaml_names(&data).map_err(|message| BoxerError::VocabularyParse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_data_yaml_names(data: &str) -> Result<Vec<String>, String> {
    let parsed: DataYaml = serde_yaml::from_str(data).map_err(|source| source.to_string())?;

    let names = match parsed.names {
        DataYamlNames::Sequence(names) => names,
        DataYamlNames::Mapping(mapping) => {
            let Some(max_index) = mapping.keys().next_back().copied() else {
                return Ok(Vec::new());
            };
            if max_index > MAX_CLASS_INDEX {
                return Err(format!(
                    "class index {} exceeds the maximum of {}",
                    max_index, MAX_CLASS_INDEX
                ));
            }
            let mut names = vec![String::new(); max_index + 1];
            for (index, name) in mapping {
                names[index] = name;
            }
            for (index, name) in names.iter_mut().enumerate() {
                if name.trim().is_empty() {
                    *name = format!("class_{}", index);
                }
            }
            names
        }
    };

    Ok(names)
}

/// Fuzz-only entrypoint for `classes.txt` parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_classes_txt(input: &str) -> Result<(), BoxerError> {
    parse_classes_txt(input).map_err(|message| BoxerError::VocabularyParse {
        path: Path::new("<fuzz>").to_path_buf(),
        message,
    })?;
    Ok(())
}

/// Fuzz-only entrypoint for `data.yaml` name parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_data_yaml_names(input: &str) -> Result<(), BoxerError> {
    parse_data_yaml_names(input).map_err(|message| BoxerError::VocabularyParse {
        path: Path::new("<fuzz>").to_path_buf(),
        message,
    })?;
    Ok(())
}
