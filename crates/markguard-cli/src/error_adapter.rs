//! Adapters for rendering markguard findings and errors with miette.
//!
//! This module provides the bridge between the library's diagnostic and
//! error types and miette's rich formatting used in the CLI. Each finding
//! of a report is rendered on its own.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity as MietteSeverity,
    SourceSpan,
};

use markguard::{
    MarkguardError, Span,
    diagnostics::{Diagnostic, Report, Severity},
    document::Document,
};

/// Adapter for a single markguard diagnostic.
///
/// The source snippet is shown only when the document carries source text
/// that covers the diagnostic's span.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: Option<&'a str>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: Option<&'a str>) -> Self {
        let src = src.filter(|src| diag.span().end() <= src.len());
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.diag.file(),
            self.diag.span(),
            self.diag.message()
        )
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("markguard({})", self.diag.code())))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.src?;
        let label = LabeledSpan::new_primary_with_span(
            Some(self.diag.kind().to_string()),
            span_to_miette(self.diag.span()),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`MarkguardError`], which carries no source location.
pub struct ErrorAdapter<'a>(pub &'a MarkguardError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MarkguardError::Io(_) => "markguard::io",
            MarkguardError::Document { .. } => "markguard::document",
            MarkguardError::Config(_) => "markguard::config",
        };
        Some(Box::new(code))
    }
}

/// A finding or an error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A finding, with a source snippet when available.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    /// Returns `true` unless this is a warning-level finding.
    pub fn is_error(&self) -> bool {
        match self {
            Reportable::Diagnostic(d) => d.diag.severity().is_error(),
            Reportable::Error(_) => true,
        }
    }

    /// Render with miette's graphical handler.
    pub fn render(&self) -> String {
        let mut writer = String::new();
        match GraphicalReportHandler::new().render_report(&mut writer, self) {
            Ok(()) => writer,
            Err(_) => self.to_string(),
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// One [`Reportable`] per finding in `report`, in discovery order.
pub fn report_reportables<'a>(document: &'a Document, report: &'a Report) -> Vec<Reportable<'a>> {
    report
        .diagnostics()
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, document.source())))
        .collect()
}

/// Convert a [`MarkguardError`] into reportable errors.
pub fn to_reportables(err: &MarkguardError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}
