//! Export check report types.
//!
//! Reports can be printed for people or serialized for scripts.

use std::fmt;

use serde::Serialize;

/// The result of checking a box set before export.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CheckReport {
    /// All issues found, in discovery order.
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add(&mut self, issue: CheckIssue) {
        self.issues.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Export check passed: no issues found");
        }

        writeln!(
            f,
            "Export check completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single check finding.
#[derive(Clone, Debug, Serialize)]
pub struct CheckIssue {
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    pub message: String,

    /// Where the issue was found.
    pub context: IssueContext,
}

impl CheckIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Exportable, but probably not what the user meant.
    Warning,
    /// The export would be wrong.
    Error,
}

/// A stable code identifying the type of check issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Label issues
    /// A box label is not in the vocabulary; YOLO output writes -1.
    UnknownLabel,
    /// A box has an empty label.
    EmptyLabel,
    /// The vocabulary lists the same label more than once.
    DuplicateVocabularyLabel,

    // Image issues
    /// No natural image size is known, so nothing can be normalized.
    MissingImageSize,

    // Geometry issues
    /// A box is not contained in the image.
    BoxOutOfBounds,
    /// A box is narrower or shorter than the minimum size.
    BoxBelowMinimumSize,

    /// There are no boxes to export.
    NoBoxes,
}

/// Where a check issue was found.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    /// The export as a whole.
    Export,
    /// An entry of the label vocabulary.
    Vocabulary { index: usize },
    /// A specific box.
    Box { id: u64 },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Export => write!(f, "export"),
            IssueContext::Vocabulary { index } => write!(f, "vocabulary entry {}", index),
            IssueContext::Box { id } => write!(f, "box {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_display() {
        let mut report = CheckReport::new();
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "Export check passed: no issues found\n");

        report.add(CheckIssue::warning(
            IssueCode::UnknownLabel,
            "label 'bird' is not in the vocabulary",
            IssueContext::Box { id: 3 },
        ));
        report.add(CheckIssue::error(
            IssueCode::MissingImageSize,
            "no image size",
            IssueContext::Export,
        ));

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(!report.is_ok());
        let text = report.to_string();
        assert!(text.contains("[WARN ] UnknownLabel in box 3: label 'bird'"));
        assert!(text.contains("[ERROR] MissingImageSize in export"));
    }

    #[test]
    fn serializes_with_tagged_context() {
        let issue = CheckIssue::warning(
            IssueCode::DuplicateVocabularyLabel,
            "dup",
            IssueContext::Vocabulary { index: 2 },
        );
        let json = serde_json::to_value(&issue).expect("serialize");
        assert_eq!(json["code"], "DuplicateVocabularyLabel");
        assert_eq!(json["context"]["kind"], "vocabulary");
        assert_eq!(json["context"]["index"], 2);
    }
}
