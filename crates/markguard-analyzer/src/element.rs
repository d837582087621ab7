//! Per-element classification.
//!
//! An element carrying the marker attribute (`safe`) is in asserted-safe
//! mode: its content will be escaped by the runtime, so the checks look for
//! escaping that is redundant or contradictory. Every other element or
//! fragment has each of its `{...}` children handed to the expression
//! analyzer.

use log::{debug, trace};

use markguard_core::syntax::{Attribute, Element, Node, NodeKind};

use crate::{
    Context,
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
    expression, oracle,
};

/// Classify one element or fragment. Other nodes are ignored.
pub(crate) fn classify(cx: &Context<'_>, node: &Node, sink: &mut DiagnosticSink) {
    match node.kind() {
        NodeKind::Fragment { children } => scan_children(cx, children, false, sink),
        NodeKind::Element(element) => classify_element(cx, element, sink),
        _ => {}
    }
}

fn classify_element(cx: &Context<'_>, element: &Element, sink: &mut DiagnosticSink) {
    if cx.rules.is_exempt_tag(element.tag()) {
        trace!(tag = element.tag(); "Skipping exempt element");
        return;
    }

    match element.attribute_with_text(cx.rules.marker_attribute()) {
        Some(marker) => check_asserted_safe(cx, element, marker, sink),
        None => scan_children(cx, element.children(), element.is_component(), sink),
    }
}

/// Hand every non-empty `{...}` child to the expression analyzer.
fn scan_children(
    cx: &Context<'_>,
    children: &[Node],
    is_component: bool,
    sink: &mut DiagnosticSink,
) {
    for expr in children.iter().filter_map(Node::contained_expression) {
        expression::analyze(cx, expr, sink, is_component);
    }
}

fn check_asserted_safe(
    cx: &Context<'_>,
    element: &Element,
    marker: &Attribute,
    sink: &mut DiagnosticSink,
) {
    let children = element.children();
    let only_text = matches!(children, [child] if child.is_markup_text());

    if children.is_empty() || only_text {
        debug!(tag = element.tag(); "Marker on element without dynamic content");
        sink.emit(Diagnostic::new(DiagnosticKind::UnusedSafe, cx.file, marker.span()));
        return;
    }

    for child in children {
        if child.is_element() {
            sink.emit(Diagnostic::new(DiagnosticKind::DoubleEscape, cx.file, marker.span()));
            continue;
        }

        let Some(expr) = child.contained_expression() else {
            continue;
        };

        if cx.rules.is_escape_call(expr.text()) {
            sink.emit(Diagnostic::new(DiagnosticKind::DoubleEscape, cx.file, marker.span()));
            continue;
        }

        let ty = cx.checker.type_at_location(expr);
        if oracle::is_safe(cx.checker, cx.rules, ty, expr)
            && !cx.rules.has_unsafe_prefix(expr.text())
            && !sink.has_diagnostic_at(cx.file, marker.span().start())
        {
            sink.emit(Diagnostic::new(DiagnosticKind::UnusedSafe, cx.file, marker.span()));
        }
    }
}
