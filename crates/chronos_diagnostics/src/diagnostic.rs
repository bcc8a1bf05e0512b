//! Structured diagnostic messages with severity, codes, and notes.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message about a constraint declaration.
///
/// Constraint sets have no source text, so instead of a span a diagnostic
/// names its `subject`: the clock, port, or pattern the finding is about.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of finding.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Name of the clock, port, or pattern concerned, if any.
    pub subject: Option<String>,
    /// Explanatory footnotes (rendered as `note: ...`).
    pub notes: Vec<String>,
    /// Actionable suggestions (rendered as `help: ...`).
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message)
    }

    fn with_severity(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            subject: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Sets the subject (clock, port, or pattern name) of this diagnostic.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Timing, 202);
        let diag = Diagnostic::error(code, "min bound exceeds max bound");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "min bound exceeds max bound");
        assert_eq!(format!("{}", diag.code), "T202");
        assert!(diag.subject.is_none());
    }

    #[test]
    fn create_warning() {
        let code = DiagnosticCode::new(Category::Warning, 1);
        let diag = Diagnostic::warning(code, "negative max delay");
        assert_eq!(diag.severity, Severity::Warning);
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Timing, 201);
        let diag = Diagnostic::error(code, "incomplete delay bounds")
            .with_subject("en")
            .with_note("input delay has a min bound but no max bound")
            .with_help("add a max input delay for `en`");
        assert_eq!(diag.subject.as_deref(), Some("en"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Timing, 204), "unresolved")
            .with_subject("dout*");
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(diag, back);
    }
}
