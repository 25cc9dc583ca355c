//! YOLO plain-text encoder.
//!
//! One line per box: `<label_index> <cx> <cy> <w> <h>`, with the center and
//! size normalized by the image's natural dimensions. Lines are joined with
//! `\n` and there is no trailing newline. Without a known image size every
//! coordinate is written as `0`.

use super::number::format_number;
use super::ExportImage;
use crate::change::BoxView;

/// Index written for labels missing from the vocabulary.
pub const UNKNOWN_LABEL_INDEX: i64 = -1;

/// Encodes `boxes` as YOLO label lines.
///
/// Labels are looked up in `vocabulary` by exact match. An unknown label is
/// written as [`UNKNOWN_LABEL_INDEX`] and logged as a warning.
pub fn encode_yolo_txt(vocabulary: &[String], boxes: &[BoxView], image: &ExportImage) -> String {
    boxes
        .iter()
        .map(|view| {
            let index = label_index(vocabulary, &view.label);
            if index == UNKNOWN_LABEL_INDEX {
                log::warn!(
                    "label '{}' of box {} is not in the vocabulary; writing {}",
                    view.label,
                    view.id,
                    UNKNOWN_LABEL_INDEX
                );
            }
            if !image.has_size() {
                return format!("{} 0 0 0 0", index);
            }
            let center = view.rect().to_normalized_center(image.width, image.height);
            format!(
                "{} {} {} {} {}",
                index,
                format_number(center.x()),
                format_number(center.y()),
                format_number(center.width),
                format_number(center.height)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Zero-based position of `label` in `vocabulary`, or [`UNKNOWN_LABEL_INDEX`].
pub fn label_index(vocabulary: &[String], label: &str) -> i64 {
    vocabulary
        .iter()
        .position(|candidate| candidate == label)
        .and_then(|index| i64::try_from(index).ok())
        .unwrap_or(UNKNOWN_LABEL_INDEX)
}
