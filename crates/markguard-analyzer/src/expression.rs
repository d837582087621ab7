//! Reduction of an embedded expression to the values it actually renders.

use log::debug;

use markguard_core::syntax::{Node, NodeKind};

use crate::{
    Context,
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
    element, oracle,
};

/// Analyze the expression of one `{...}` slot.
///
/// `is_component` selects [`DiagnosticKind::ComponentXss`] over
/// [`DiagnosticKind::Xss`] for whatever ends up reported.
pub(crate) fn analyze(
    cx: &Context<'_>,
    expr: &Node,
    sink: &mut DiagnosticSink,
    is_component: bool,
) {
    // One level only; `((x))` keeps its inner parentheses
    let expr = match expr.kind() {
        NodeKind::Parenthesized { expression } => expression.as_ref(),
        _ => expr,
    };

    // Markup is classified by the walker
    if expr.is_markup() {
        return;
    }

    match expr.kind() {
        NodeKind::Binary {
            operator, right, ..
        } => {
            if !operator.yields_boolean() {
                analyze(cx, right, sink, is_component);
            }
            return;
        }
        NodeKind::Conditional {
            when_true,
            when_false,
            ..
        } => {
            analyze(cx, when_true, sink, is_component);
            analyze(cx, when_false, sink, is_component);
            return;
        }
        _ => {}
    }

    let ty = cx.checker.type_at_location(expr);
    if oracle::is_safe(cx.checker, cx.rules, ty, expr) {
        return;
    }

    if !expr.is_identifier() {
        let embedded: Vec<&Node> = expr
            .children()
            .into_iter()
            .filter(|child| child.is_markup())
            .collect();
        if !embedded.is_empty() {
            for markup in embedded {
                element::classify(cx, markup, sink);
            }
            return;
        }
    }

    // Fragments returned above, so only the enclosing tag picks the kind
    let kind = if is_component {
        DiagnosticKind::ComponentXss
    } else {
        DiagnosticKind::Xss
    };
    debug!(
        file = cx.file,
        span:% = expr.span(),
        text = expr.text(),
        kind = kind.as_str();
        "Unescaped expression"
    );
    sink.emit(Diagnostic::new(kind, cx.file, expr.span()));
}
