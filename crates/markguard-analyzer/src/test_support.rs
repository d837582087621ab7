//! Tree and type builders shared by the unit tests.

use markguard_core::{
    Span,
    syntax::{Attribute, Element, Node},
    types::{TypeId, TypeInfo, TypeKind, TypeTable},
};

use crate::{Rules, analyze, diagnostics::Diagnostic, diagnostics::DiagnosticSink};

pub(crate) const FILE: &str = "test.tsx";

/// A type table that hands out ids as types are attached to nodes.
#[derive(Default)]
pub(crate) struct Fixture {
    types: TypeTable,
    next_id: u32,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a type without attaching it to any node.
    pub(crate) fn register(&mut self, info: TypeInfo) -> TypeId {
        let id = TypeId::new(self.next_id);
        self.next_id += 1;
        self.types.insert(id, info);
        id
    }

    /// Attach a type of `kind` to `node`'s span and hand the node back.
    pub(crate) fn typed(&mut self, node: Node, kind: TypeKind) -> Node {
        self.typed_info(node, TypeInfo::new(kind))
    }

    pub(crate) fn typed_info(&mut self, node: Node, info: TypeInfo) -> Node {
        let id = self.register(info);
        self.types.assign(node.span(), id);
        node
    }

    pub(crate) fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Run the whole analysis over `root` with default rules.
    pub(crate) fn run(&self, root: &Node) -> Vec<Diagnostic> {
        self.run_with(root, &Rules::default())
    }

    pub(crate) fn run_with(&self, root: &Node, rules: &Rules) -> Vec<Diagnostic> {
        let mut sink = DiagnosticSink::new();
        analyze(FILE, root, &self.types, rules, &mut sink);
        sink.into_report().into_diagnostics()
    }
}

pub(crate) fn ident(start: usize, text: &str) -> Node {
    Node::identifier(Span::from_width(start, text.len()), text)
}

pub(crate) fn markup_text(start: usize, text: &str) -> Node {
    Node::markup_text(Span::from_width(start, text.len()), text)
}

/// `callee(args)` where `text` is the whole call.
pub(crate) fn call(start: usize, text: &str, callee: &str) -> Node {
    Node::call(
        Span::from_width(start, text.len()),
        text,
        ident(start, callee),
        Vec::new(),
    )
}

/// Wrap `expression` in `{...}`.
pub(crate) fn container(expression: Node) -> Node {
    let span = expression.span();
    let text = format!("{{{}}}", expression.text());
    Node::container(Span::new(span.start() - 1..span.end() + 1), text, Some(expression))
}

/// A bare `safe` attribute at `start`.
pub(crate) fn marker(start: usize) -> Attribute {
    Attribute::new("safe", Span::from_width(start, 4))
}

pub(crate) fn element(start: usize, tag: &str, attributes: Vec<Attribute>, children: Vec<Node>) -> Node {
    let end = children.last().map_or(start, |child| child.span().end()) + tag.len() + 3;
    let element = attributes
        .into_iter()
        .fold(Element::new(tag), Element::with_attribute);
    let element = children.into_iter().fold(element, Element::with_child);
    Node::element(Span::new(start..end), "", element)
}

pub(crate) fn fragment(start: usize, children: Vec<Node>) -> Node {
    let end = children.last().map_or(start, |child| child.span().end()) + 3;
    Node::fragment(Span::new(start..end), "", children)
}
