use markguard_analyzer::{
    Rules, analyze,
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
};
use markguard_core::{
    Span,
    syntax::{Attribute, BinaryOperator, Element, Node},
    types::{TypeId, TypeInfo, TypeKind, TypeTable},
};
use proptest::prelude::*;

const FILE: &str = "page.tsx";

fn run(root: &Node, types: &TypeTable) -> Vec<Diagnostic> {
    let mut sink = DiagnosticSink::new();
    analyze(FILE, root, types, &Rules::default(), &mut sink);
    sink.into_report().into_diagnostics()
}

fn ident(start: usize, text: &str) -> Node {
    Node::identifier(Span::from_width(start, text.len()), text)
}

fn container(expression: Node) -> Node {
    let span = expression.span();
    let text = format!("{{{}}}", expression.text());
    Node::container(Span::new(span.start() - 1..span.end() + 1), text, Some(expression))
}

fn element(tag: &str, attributes: Vec<Attribute>, children: Vec<Node>) -> Node {
    let end = children.last().map_or(tag.len() + 2, |child| child.span().end()) + tag.len() + 3;
    let element = attributes
        .into_iter()
        .fold(Element::new(tag), Element::with_attribute);
    let element = children.into_iter().fold(element, Element::with_child);
    Node::element(Span::new(0..end), "", element)
}

fn safe_marker(tag: &str) -> Attribute {
    Attribute::new("safe", Span::from_width(tag.len() + 2, 4))
}

fn scalar_kind() -> impl Strategy<Value = TypeKind> {
    prop_oneof![
        Just(TypeKind::Number),
        Just(TypeKind::Boolean),
        Just(TypeKind::BigInt),
        Just(TypeKind::Null),
        Just(TypeKind::Undefined),
        Just(TypeKind::Void),
        Just(TypeKind::Never),
        Just(TypeKind::Unknown),
        "[a-z]{0,8}".prop_map(|value| TypeKind::StringLiteral { value }),
    ]
}

fn any_kind() -> impl Strategy<Value = TypeKind> {
    prop_oneof![
        scalar_kind(),
        Just(TypeKind::Any),
        Just(TypeKind::String),
        Just(TypeKind::Object),
    ]
}

fn boolean_operator() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![
        Just(BinaryOperator::StrictEquals),
        Just(BinaryOperator::StrictNotEquals),
        Just(BinaryOperator::Equals),
        Just(BinaryOperator::NotEquals),
        Just(BinaryOperator::GreaterThan),
        Just(BinaryOperator::LessThan),
        Just(BinaryOperator::GreaterThanOrEqual),
        Just(BinaryOperator::LessThanOrEqual),
        Just(BinaryOperator::In),
        Just(BinaryOperator::InstanceOf),
    ]
}

fn identifier_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,10}"
}

proptest! {
    #[test]
    fn script_content_is_never_diagnosed(
        kinds in prop::collection::vec(any_kind(), 0..6),
        with_marker in any::<bool>(),
    ) {
        let mut types = TypeTable::new();
        let mut children = Vec::new();
        for (i, kind) in kinds.into_iter().enumerate() {
            let value = ident(20 + i * 10, "value");
            types = types.with_type_at(value.span(), TypeId::new(i as u32), TypeInfo::new(kind));
            children.push(container(value));
        }
        let attributes = if with_marker { vec![safe_marker("script")] } else { vec![] };
        let root = element("script", attributes, children);

        prop_assert!(run(&root, &types).is_empty());
    }

    #[test]
    fn boolean_operators_are_never_diagnosed(
        operator in boolean_operator(),
        left in any_kind(),
        right in any_kind(),
    ) {
        let a = ident(6, "left");
        let b = ident(16, "right");
        let types = TypeTable::new()
            .with_type_at(a.span(), TypeId::new(0), TypeInfo::new(left))
            .with_type_at(b.span(), TypeId::new(1), TypeInfo::new(right));
        let expr = Node::binary(Span::new(6..21), "", a, operator, b);
        let root = element("div", vec![], vec![container(expr)]);

        prop_assert!(run(&root, &types).is_empty());
    }

    #[test]
    fn unions_of_safe_members_are_never_diagnosed(
        members in prop::collection::vec(scalar_kind(), 1..5),
        name in identifier_name(),
    ) {
        let mut types = TypeTable::new();
        let ids: Vec<TypeId> = (0..members.len() as u32).map(TypeId::new).collect();
        for (id, kind) in ids.iter().zip(members) {
            types.insert(*id, TypeInfo::new(kind));
        }
        let value = ident(6, &name);
        let union_id = TypeId::new(ids.len() as u32);
        let types = types.with_type_at(
            value.span(),
            union_id,
            TypeInfo::new(TypeKind::Union { members: ids }),
        );
        let root = element("div", vec![], vec![container(value)]);

        prop_assert!(run(&root, &types).is_empty());
    }

    #[test]
    fn conditions_are_never_diagnosed(condition in any_kind(), name in identifier_name()) {
        let flag = ident(6, &name);
        let when_true = ident(30, "a");
        let when_false = ident(34, "b");
        let types = TypeTable::new()
            .with_type_at(flag.span(), TypeId::new(0), TypeInfo::new(condition))
            .with_type_at(when_true.span(), TypeId::new(1), TypeInfo::new(TypeKind::Number))
            .with_type_at(when_false.span(), TypeId::new(2), TypeInfo::new(TypeKind::Boolean));
        let expr = Node::conditional(Span::new(6..35), "", flag, when_true, when_false);
        let root = element("div", vec![], vec![container(expr)]);

        prop_assert!(run(&root, &types).is_empty());
    }

    #[test]
    fn marker_without_dynamic_content_warns_once(
        tag in "[a-z]{1,8}".prop_filter("exempt", |tag| tag != "script"),
        text in prop::option::of("[a-z ]{1,12}"),
    ) {
        let children = text
            .map(|text| vec![Node::markup_text(Span::from_width(tag.len() + 7, text.len()), text)])
            .unwrap_or_default();
        let marker = safe_marker(&tag);
        let marker_span = marker.span();
        let root = element(&tag, vec![marker], children);

        let diags = run(&root, &TypeTable::new());

        prop_assert_eq!(diags.len(), 1);
        prop_assert_eq!(diags[0].kind(), DiagnosticKind::UnusedSafe);
        prop_assert_eq!(diags[0].span(), marker_span);
    }

    #[test]
    fn nested_elements_under_marker_are_double_escapes(count in 1usize..5) {
        let children: Vec<Node> = (0..count)
            .map(|i| Node::element(Span::from_width(10 + i * 7, 7), "<b></b>", Element::new("b")))
            .collect();
        let marker = safe_marker("div");
        let root = element("div", vec![marker], children);

        let diags = run(&root, &TypeTable::new());

        let double = diags
            .iter()
            .filter(|d| d.kind() == DiagnosticKind::DoubleEscape)
            .count();
        prop_assert!(double >= count);
    }
}

#[test]
fn user_input_in_native_element() {
    // <div>{userInput}</div>
    let input = ident(6, "userInput");
    let types = TypeTable::new().with_type_at(input.span(), TypeId::new(0), TypeInfo::new(TypeKind::String));
    let root = element("div", vec![], vec![container(input)]);

    let diags = run(&root, &types);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), DiagnosticKind::Xss);
    assert_eq!(diags[0].span(), Span::new(6..15));
}

#[test]
fn data_in_component() {
    // <UserCard>{data}</UserCard>
    let data = ident(11, "data");
    let types = TypeTable::new().with_type_at(data.span(), TypeId::new(0), TypeInfo::new(TypeKind::String));
    let root = element("UserCard", vec![], vec![container(data)]);

    let kinds: Vec<_> = run(&root, &types).iter().map(Diagnostic::kind).collect();

    assert_eq!(kinds, vec![DiagnosticKind::ComponentXss]);
}

#[test]
fn escape_call_under_marker() {
    // <div safe>{escapeHtml(x)}</div>
    let x = ident(22, "x");
    let callee = ident(11, "escapeHtml");
    let escaped = Node::call(Span::new(11..24), "escapeHtml(x)", callee, vec![x]);
    let types = TypeTable::new().with_type_at(escaped.span(), TypeId::new(0), TypeInfo::new(TypeKind::String));
    let root = element("div", vec![safe_marker("div")], vec![container(escaped)]);

    let diags = run(&root, &types);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), DiagnosticKind::DoubleEscape);
    assert_eq!(diags[0].span(), Span::new(5..9));
}

#[test]
fn ternary_reports_only_unsafe_branch() {
    // <div>{flag ? "" : userInput}</div>
    let flag = ident(6, "flag");
    let empty = Node::other(Span::new(13..15), "\"\"", vec![]);
    let input = ident(18, "userInput");
    let types = TypeTable::new()
        .with_type_at(flag.span(), TypeId::new(0), TypeInfo::new(TypeKind::String))
        .with_type_at(
            empty.span(),
            TypeId::new(1),
            TypeInfo::new(TypeKind::StringLiteral { value: String::new() }),
        )
        .with_type_at(input.span(), TypeId::new(2), TypeInfo::new(TypeKind::String));
    let expr = Node::conditional(Span::new(6..27), "flag ? \"\" : userInput", flag, empty, input);
    let root = element("div", vec![], vec![container(expr)]);

    let diags = run(&root, &types);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), DiagnosticKind::Xss);
    assert_eq!(diags[0].span(), Span::new(18..27));
}

#[test]
fn marker_on_literal_text() {
    // <div safe>hello</div>
    let hello = Node::markup_text(Span::new(10..15), "hello");
    let root = element("div", vec![safe_marker("div")], vec![hello]);

    let diags = run(&root, &TypeTable::new());

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), DiagnosticKind::UnusedSafe);
    assert!(diags[0].severity().is_warning());
}
