//! Annotation export encoders.
//!
//! Both encoders are pure functions over a box snapshot. They never fail:
//! unknown labels and empty box sets are ordinary data.
//!
//! - [`ExportFormat::VocXml`]: Pascal VOC XML (`.xml`), labels as strings.
//! - [`ExportFormat::YoloTxt`]: YOLO label lines (`.txt`), labels as
//!   vocabulary indices.

mod number;
mod voc_xml;
mod yolo_txt;

use std::fmt;
use std::str::FromStr;

pub use number::format_number;
pub use voc_xml::{encode_voc_xml, encode_voc_xml_for_year};
pub use yolo_txt::{encode_yolo_txt, label_index, UNKNOWN_LABEL_INDEX};

use crate::change::BoxView;
use crate::error::BoxerError;

/// File stem used when the image name gives nothing usable.
pub const FALLBACK_FILE_STEM: &str = "image";

/// A supported export format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    VocXml,
    YoloTxt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::VocXml, ExportFormat::YoloTxt];

    /// Stable identifier, as accepted by [`FromStr`].
    pub fn id(self) -> &'static str {
        match self {
            ExportFormat::VocXml => "voc",
            ExportFormat::YoloTxt => "yolo",
        }
    }

    /// File extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::VocXml => ".xml",
            ExportFormat::YoloTxt => ".txt",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::VocXml => "Pascal VOC XML",
            ExportFormat::YoloTxt => "YOLO TXT",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExportFormat {
    type Err = BoxerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "voc" | "voc-xml" | "xml" => Ok(ExportFormat::VocXml),
            "yolo" | "yolo-txt" | "txt" => Ok(ExportFormat::YoloTxt),
            other => Err(BoxerError::UnsupportedFormat(format!(
                "'{}' (supported: voc, yolo)",
                other
            ))),
        }
    }
}

/// Image metadata written alongside the boxes.
///
/// A zero (default) width or height means the image size is unknown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportImage {
    /// File name as shown to the user, if known.
    pub file_name: Option<String>,
    /// Natural width in pixels.
    pub width: f64,
    /// Natural height in pixels.
    pub height: f64,
}

impl ExportImage {
    /// True if both dimensions are positive and finite.
    pub fn has_size(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Encodes `boxes` in `format`.
///
/// `vocabulary` is only consulted by formats that write label indices.
pub fn encode(
    format: ExportFormat,
    vocabulary: &[String],
    boxes: &[BoxView],
    image: &ExportImage,
) -> String {
    log::debug!("encoding {} boxes as {}", boxes.len(), format.label());
    match format {
        ExportFormat::VocXml => encode_voc_xml(boxes, image),
        ExportFormat::YoloTxt => encode_yolo_txt(vocabulary, boxes, image),
    }
}

/// Output file name for an image: its name minus the last extension, plus
/// the format's extension.
///
/// A missing name, or one without an extension, becomes `image`.
pub fn export_file_name(image_name: Option<&str>, format: ExportFormat) -> String {
    let stem = image_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(stem, _)| stem)
        .unwrap_or(FALLBACK_FILE_STEM);
    format!("{}{}", stem, format.extension())
}
