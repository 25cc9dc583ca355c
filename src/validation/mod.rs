//! Pre-export checks.
//!
//! The encoders accept anything. This module points out what they would
//! write but the user probably did not mean:
//! - Labels missing from the vocabulary (YOLO writes them as -1)
//! - Vocabulary problems (empty or duplicate entries)
//! - Geometry the stage would not have committed (outside the image, too small)

mod report;

pub use report::{CheckIssue, CheckReport, IssueCode, IssueContext, Severity};

use std::collections::HashMap;

use crate::change::BoxView;
use crate::geometry::ImageBounds;

/// Options for the export check.
#[derive(Clone, Debug)]
pub struct CheckOptions {
    /// Boxes below this width or height are reported.
    pub minimum_size: f64,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            minimum_size: crate::stage::DEFAULT_MINIMUM_SIZE,
        }
    }
}

/// Checks a box set against a vocabulary and image size.
///
/// `image` is `None` when no background size is known.
pub fn check_export(
    vocabulary: &[String],
    boxes: &[BoxView],
    image: Option<ImageBounds>,
    opts: &CheckOptions,
) -> CheckReport {
    let mut report = CheckReport::new();

    check_vocabulary(vocabulary, &mut report);

    if image.is_none() {
        report.add(CheckIssue::error(
            IssueCode::MissingImageSize,
            "No image size is known; coordinates cannot be normalized",
            IssueContext::Export,
        ));
    }

    if boxes.is_empty() {
        report.add(CheckIssue::warning(
            IssueCode::NoBoxes,
            "Nothing to export",
            IssueContext::Export,
        ));
    }

    check_boxes(vocabulary, boxes, image, opts, &mut report);

    report
}

fn check_vocabulary(vocabulary: &[String], report: &mut CheckReport) {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (index, label) in vocabulary.iter().enumerate() {
        if label.is_empty() {
            report.add(CheckIssue::warning(
                IssueCode::EmptyLabel,
                "Empty vocabulary label",
                IssueContext::Vocabulary { index },
            ));
            continue;
        }

        if let Some(first) = seen.get(label.as_str()) {
            report.add(CheckIssue::warning(
                IssueCode::DuplicateVocabularyLabel,
                format!(
                    "Duplicate label '{}' (first listed at index {}); YOLO output uses the first",
                    label, first
                ),
                IssueContext::Vocabulary { index },
            ));
        } else {
            seen.insert(label, index);
        }
    }
}

fn check_boxes(
    vocabulary: &[String],
    boxes: &[BoxView],
    image: Option<ImageBounds>,
    opts: &CheckOptions,
    report: &mut CheckReport,
) {
    for view in boxes {
        let id = view.id.as_u64();

        if view.label.is_empty() {
            report.add(CheckIssue::warning(
                IssueCode::EmptyLabel,
                "Box has an empty label",
                IssueContext::Box { id },
            ));
        } else if !vocabulary.iter().any(|label| label == &view.label) {
            report.add(CheckIssue::warning(
                IssueCode::UnknownLabel,
                format!(
                    "Label '{}' is not in the vocabulary; YOLO output writes -1",
                    view.label
                ),
                IssueContext::Box { id },
            ));
        }

        let rect = view.rect();
        if let Some(bounds) = image {
            if !rect.is_finite() || !bounds.contains(&rect.canonical()) {
                report.add(CheckIssue::error(
                    IssueCode::BoxOutOfBounds,
                    format!(
                        "Box [{}, {}, {}, {}] is outside the {}x{} image",
                        rect.x(),
                        rect.y(),
                        rect.xmax(),
                        rect.ymax(),
                        bounds.width,
                        bounds.height
                    ),
                    IssueContext::Box { id },
                ));
            }
        }

        let floor_w = image.map_or(opts.minimum_size, |b| opts.minimum_size.min(b.width));
        let floor_h = image.map_or(opts.minimum_size, |b| opts.minimum_size.min(b.height));
        if rect.width.abs() < floor_w || rect.height.abs() < floor_h {
            report.add(CheckIssue::warning(
                IssueCode::BoxBelowMinimumSize,
                format!(
                    "Box is {}x{}, below the minimum size {}",
                    rect.width, rect.height, opts.minimum_size
                ),
                IssueContext::Box { id },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxId;

    fn vocabulary() -> Vec<String> {
        vec!["cat".to_string(), "dog".to_string()]
    }

    fn view(id: u64, label: &str, x: f64, y: f64, width: f64, height: f64) -> BoxView {
        BoxView {
            id: BoxId(id),
            label: label.to_string(),
            x,
            y,
            width,
            height,
            highlighted: false,
        }
    }

    fn bounds() -> Option<ImageBounds> {
        Some(ImageBounds::new(100.0, 50.0))
    }

    #[test]
    fn clean_export() {
        let report = check_export(
            &vocabulary(),
            &[view(1, "dog", 10.0, 10.0, 20.0, 10.0)],
            bounds(),
            &CheckOptions::default(),
        );
        assert!(report.is_clean(), "{}", report);
    }

    #[test]
    fn unknown_label_is_a_warning() {
        let report = check_export(
            &vocabulary(),
            &[view(1, "bird", 10.0, 10.0, 20.0, 10.0)],
            bounds(),
            &CheckOptions::default(),
        );
        assert!(report.is_ok());
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_code(IssueCode::UnknownLabel));
    }

    #[test]
    fn missing_image_size_is_an_error() {
        let report = check_export(
            &vocabulary(),
            &[view(1, "cat", 0.0, 0.0, 5.0, 5.0)],
            None,
            &CheckOptions::default(),
        );
        assert_eq!(report.error_count(), 1);
        assert!(report.has_code(IssueCode::MissingImageSize));
    }

    #[test]
    fn out_of_bounds_and_tiny_boxes() {
        let report = check_export(
            &vocabulary(),
            &[
                view(1, "cat", 90.0, 10.0, 20.0, 10.0),
                view(2, "cat", 10.0, 10.0, 1.0, 10.0),
            ],
            bounds(),
            &CheckOptions::default(),
        );
        assert!(report.has_code(IssueCode::BoxOutOfBounds));
        assert!(report.has_code(IssueCode::BoxBelowMinimumSize));
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn minimum_size_floor_is_capped_by_tiny_image() {
        let report = check_export(
            &vocabulary(),
            &[view(1, "cat", 0.0, 0.0, 2.0, 2.0)],
            Some(ImageBounds::new(2.0, 2.0)),
            &CheckOptions::default(),
        );
        assert!(report.is_clean(), "{}", report);
    }

    #[test]
    fn vocabulary_issues() {
        let vocabulary = vec!["cat".to_string(), String::new(), "cat".to_string()];
        let report = check_export(
            &vocabulary,
            &[view(1, "cat", 0.0, 0.0, 5.0, 5.0)],
            bounds(),
            &CheckOptions::default(),
        );
        assert!(report.has_code(IssueCode::EmptyLabel));
        assert!(report.has_code(IssueCode::DuplicateVocabularyLabel));
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn empty_box_set_warns() {
        let report = check_export(&vocabulary(), &[], bounds(), &CheckOptions::default());
        assert!(report.has_code(IssueCode::NoBoxes));
        assert!(report.is_ok());
    }
}
