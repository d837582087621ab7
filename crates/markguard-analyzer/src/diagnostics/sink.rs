//! Sink for accumulating diagnostics during one document's analysis.
//!
//! The caller creates the [`DiagnosticSink`], the analysis appends to it
//! through a `&mut` borrow, and the caller turns it into a [`Report`].

use crate::diagnostics::{Diagnostic, Report};

/// An append-only, discovery-ordered collection of diagnostics.
///
/// # Example
///
/// ```
/// # use markguard_analyzer::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
/// # use markguard_core::Span;
///
/// let mut sink = DiagnosticSink::new();
/// sink.emit(Diagnostic::new(DiagnosticKind::UnusedSafe, "a.tsx", Span::new(5..9)));
///
/// assert!(sink.has_diagnostic_at("a.tsx", 5));
/// assert!(!sink.has_errors());
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticSink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if any diagnostic so far starts at `offset` in `file`.
    ///
    /// This is a linear scan; kinds are not compared.
    pub fn has_diagnostic_at(&self, file: &str, offset: usize) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.is_anchored_at(file, offset))
    }

    /// The diagnostics emitted so far, in discovery order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and hand the diagnostics back as a [`Report`].
    pub fn into_report(self) -> Report {
        Report::new(self.diagnostics)
    }
}
