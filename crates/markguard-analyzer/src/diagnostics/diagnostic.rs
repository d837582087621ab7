//! The core diagnostic type.
//!
//! A [`Diagnostic`] is one finding: what kind it is, where it is anchored,
//! and the catalog message and suggestion for it.

use std::fmt;

use markguard_core::Span;

use crate::diagnostics::{DiagnosticKind, Severity};

/// A finding anchored at a source span.
///
/// # Example
///
/// ```text
/// error[88601]: xss-prone content is rendered without the `safe` attribute
///   --> page.tsx:1:7
///    |
///  1 | <div>{userInput}</div>
///    |       ^^^^^^^^^
///    |
///    = help: add the `safe` attribute to the element, ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    severity: Severity,
    file: String,
    span: Span,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic of `kind` with its catalog severity, message and help.
    pub fn new(kind: DiagnosticKind, file: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            file: file.into(),
            span,
            message: kind.message().to_string(),
            help: Some(kind.help().to_string()),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The stable numeric code of this diagnostic's kind.
    pub fn code(&self) -> u32 {
        self.kind.code()
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Replace the catalog message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the catalog help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Returns `true` if this diagnostic starts at `offset` in `file`.
    pub fn is_anchored_at(&self, file: &str, offset: usize) -> bool {
        self.span.start() == offset && self.file == file
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[88601]: message"
        write!(f, "{}[{}]: {}", self.severity, self.code(), self.message)
    }
}
