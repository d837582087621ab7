//! Type-directed XSS analysis of JSX-like markup trees.
//!
//! The analysis walks a [`Node`] tree, classifies every element and fragment
//! and asks a [`TypeChecker`] whether each interpolated `{...}` value can carry
//! markup text. Findings are appended to a [`DiagnosticSink`] in discovery
//! order.
//!
//! # Example
//!
//! ```
//! # use markguard_analyzer::{Rules, analyze, diagnostics::{DiagnosticKind, DiagnosticSink}};
//! # use markguard_core::{Span, syntax::{Element, Node}, types::{TypeId, TypeInfo, TypeKind, TypeTable}};
//! let input = Node::identifier(Span::new(6..15), "userInput");
//! let root = Node::element(
//!     Span::new(0..22),
//!     "<div>{userInput}</div>",
//!     Element::new("div").with_child(Node::container(Span::new(5..16), "{userInput}", Some(input))),
//! );
//! let types = TypeTable::new().with_type_at(Span::new(6..15), TypeId::new(0), TypeInfo::new(TypeKind::String));
//!
//! let mut sink = DiagnosticSink::new();
//! analyze("page.tsx", &root, &types, &Rules::default(), &mut sink);
//!
//! let report = sink.into_report();
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.diagnostics()[0].kind(), DiagnosticKind::Xss);
//! ```

pub mod diagnostics;
pub mod oracle;

mod element;
mod expression;
mod rules;
mod walker;

#[cfg(test)]
mod test_support;

use log::{debug, info};

use markguard_core::{document::Document, syntax::Node, types::TypeChecker};

use crate::diagnostics::{DiagnosticSink, Report};

pub use rules::Rules;

/// Everything the analysis reads but never changes while visiting one file.
pub(crate) struct Context<'a> {
    pub(crate) file: &'a str,
    pub(crate) checker: &'a dyn TypeChecker,
    pub(crate) rules: &'a Rules,
}

/// Analyze the tree rooted at `root`, which belongs to `file`.
///
/// Diagnostics are appended to `sink`; nothing already in it is removed.
/// Diagnostics already in the sink for `file` take part in the unused-marker
/// suppression.
pub fn analyze(
    file: &str,
    root: &Node,
    checker: &dyn TypeChecker,
    rules: &Rules,
    sink: &mut DiagnosticSink,
) {
    let cx = Context {
        file,
        checker,
        rules,
    };
    let before = sink.len();
    walker::walk(&cx, root, sink);
    debug!(file, found = sink.len() - before; "Analysis finished");
}

/// Analyze a whole [`Document`] with its own type table.
pub fn check_document(document: &Document, rules: &Rules) -> Report {
    info!(file = document.file(); "Checking document");
    let mut sink = DiagnosticSink::new();
    analyze(document.file(), document.root(), document.types(), rules, &mut sink);
    sink.into_report()
}
