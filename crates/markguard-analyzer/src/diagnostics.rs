//! Diagnostic system for the markguard analyzer.
//!
//! This module provides:
//! - A fixed catalog of finding kinds with stable numeric codes
//! - Severity levels
//! - An append-only sink the analysis threads through every call
//! - A report handed back to the caller once a document is done
//!
//! # Example
//!
//! ```
//! # use markguard_analyzer::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
//! # use markguard_core::Span;
//!
//! let mut sink = DiagnosticSink::new();
//! sink.emit(Diagnostic::new(DiagnosticKind::Xss, "page.tsx", Span::new(6..15)));
//!
//! let report = sink.into_report();
//! assert!(report.has_errors());
//! assert_eq!(report.diagnostics()[0].code(), 88601);
//! ```

mod diagnostic;
mod kind;
mod report;
mod severity;
mod sink;

pub use diagnostic::Diagnostic;
pub use kind::DiagnosticKind;
pub use report::Report;
pub use severity::Severity;
pub use sink::DiagnosticSink;
