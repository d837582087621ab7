//! Whole-tree traversal.
//!
//! Markup can sit anywhere: inside attribute values, call arguments, arrow
//! function bodies or variable declarations. Element-level recursion only
//! follows suspicious expressions, so every element and fragment is found
//! here instead.

use log::trace;

use markguard_core::syntax::Node;

use crate::{Context, diagnostics::DiagnosticSink, element};

/// Visit `node` and all of its descendants, children before parents, and
/// classify every element and fragment.
pub(crate) fn walk(cx: &Context<'_>, node: &Node, sink: &mut DiagnosticSink) {
    for child in node.children() {
        walk(cx, child, sink);
    }

    if node.is_markup() {
        trace!(kind = node.kind().name(), span:% = node.span(); "Classifying markup");
        element::classify(cx, node, sink);
    }
}
