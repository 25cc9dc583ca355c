use std::path::PathBuf;
use thiserror::Error;

use crate::validation::CheckReport;

/// The main error type for boxer operations.
///
/// Geometry and export never fail for ordinary data; these variants cover
/// image loading and the command-line collaborator's file handling.
#[derive(Debug, Error)]
pub enum BoxerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load background image {url}: {message}")]
    ImageLoad { url: String, message: String },

    #[error("Failed to parse box seeds from {path}: {source}")]
    BoxesJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON: {0}")]
    JsonWrite(#[source] serde_json::Error),

    #[error("Failed to parse label vocabulary {path}: {message}")]
    VocabularyParse { path: PathBuf, message: String },

    #[error("Export check failed with {error_count} error(s) and {warning_count} warning(s)")]
    CheckFailed {
        error_count: usize,
        warning_count: usize,
        report: CheckReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
