//! Type-directed safety decisions.
//!
//! [`is_safe`] walks a fixed lattice; the first matching rule decides:
//!
//! 1. unresolved type: safe
//! 2. `any`: unsafe
//! 3. the rendered-markup alias, produced by a call: safe
//! 4. the sanitized-children alias: safe
//! 5. union: safe iff every member is safe
//! 6. array or deferred value: the first type argument decides (none: safe)
//! 7. neither `string` nor object: safe
//! 8. otherwise safe only if the expression text carries the safe prefix or
//!    is an escape call

use log::trace;

use markguard_core::{
    syntax::Node,
    types::{TypeChecker, TypeInfo, TypeKind},
};

use crate::Rules;

/// Decide whether `expr`, whose type is `ty`, can be rendered without escaping.
///
/// `expr` stays the same through the recursion into unions and type
/// arguments; only the type changes. A type reached again through its own
/// members or arguments, as in `type Nested = string | Nested[]`, counts as
/// unresolved.
pub fn is_safe(
    checker: &dyn TypeChecker,
    rules: &Rules,
    ty: Option<&TypeInfo>,
    expr: &Node,
) -> bool {
    decide(checker, rules, ty, expr, &mut Vec::new())
}

/// `path` holds the union, array and deferred types currently being expanded.
fn decide<'a>(
    checker: &'a dyn TypeChecker,
    rules: &Rules,
    ty: Option<&'a TypeInfo>,
    expr: &Node,
    path: &mut Vec<&'a TypeInfo>,
) -> bool {
    let Some(ty) = ty else {
        return true;
    };

    if path.iter().any(|seen| std::ptr::eq(*seen, ty)) {
        trace!(kind:? = ty.kind(); "Recursive type treated as unresolved");
        return true;
    }

    if matches!(ty.kind(), TypeKind::Any) {
        return false;
    }

    // A bare variable of the markup type may never have been rendered
    if expr.is_call() && ty.has_alias(rules.rendered_markup()) {
        return true;
    }

    if ty.has_alias(rules.sanitized_children()) {
        return true;
    }

    match ty.kind() {
        TypeKind::Union { .. } => {
            path.push(ty);
            let safe = checker
                .union_members(ty)
                .into_iter()
                .all(|member| decide(checker, rules, Some(member), expr, path));
            path.pop();
            safe
        }
        TypeKind::Array { .. } | TypeKind::Deferred { .. } => {
            path.push(ty);
            let safe = decide(checker, rules, checker.first_type_argument(ty), expr, path);
            path.pop();
            safe
        }
        TypeKind::String | TypeKind::Object => {
            let text = expr.text();
            let safe = rules.has_safe_prefix(text) || rules.is_escape_call(text);
            if !safe {
                trace!(text, kind:? = ty.kind(); "Markup-capable type without escaping");
            }
            safe
        }
        TypeKind::Any => false,
        TypeKind::Unknown
        | TypeKind::Never
        | TypeKind::StringLiteral { .. }
        | TypeKind::Number
        | TypeKind::Boolean
        | TypeKind::BigInt
        | TypeKind::Null
        | TypeKind::Undefined
        | TypeKind::Void => true,
    }
}

#[cfg(test)]
mod tests {
    use markguard_core::types::{TypeAlias, TypeId, TypeTable};

    use super::*;
    use crate::test_support::{Fixture, call, ident};

    fn check(fx: &Fixture, ty: &TypeInfo, expr: &Node) -> bool {
        is_safe(fx.types(), &Rules::default(), Some(ty), expr)
    }

    fn rendered() -> TypeAlias {
        TypeAlias::scoped("JSX", "Element")
    }

    #[test]
    fn test_unresolved_type_is_safe() {
        let table = TypeTable::new();
        assert!(is_safe(&table, &Rules::default(), None, &ident(0, "anything")));
    }

    #[test]
    fn test_any_is_unsafe_even_when_named_safe() {
        let fx = Fixture::new();
        let ty = TypeInfo::new(TypeKind::Any);

        assert!(!check(&fx, &ty, &ident(0, "safeValue")));
        assert!(!check(&fx, &ty, &call(0, "escapeHtml(x)", "escapeHtml")));
    }

    #[test]
    fn test_rendered_markup_requires_call() {
        let fx = Fixture::new();
        let ty = TypeInfo::new(TypeKind::Object).with_alias(rendered());

        assert!(check(&fx, &ty, &call(0, "render()", "render")));
        assert!(!check(&fx, &ty, &ident(0, "element")));
    }

    #[test]
    fn test_sanitized_children_are_safe() {
        let fx = Fixture::new();
        let ty = TypeInfo::new(TypeKind::String).with_alias(TypeAlias::scoped("Html", "Children"));

        assert!(check(&fx, &ty, &ident(0, "children")));
    }

    #[test]
    fn test_union_requires_every_member() {
        let mut fx = Fixture::new();
        let number = fx.register(TypeInfo::new(TypeKind::Number));
        let null = fx.register(TypeInfo::new(TypeKind::Null));
        let string = fx.register(TypeInfo::new(TypeKind::String));

        let safe = TypeInfo::new(TypeKind::Union {
            members: vec![number, null],
        });
        let unsafe_ = TypeInfo::new(TypeKind::Union {
            members: vec![number, string],
        });

        assert!(check(&fx, &safe, &ident(0, "count")));
        assert!(!check(&fx, &unsafe_, &ident(0, "count")));
        // The text prefix applies to members too
        assert!(check(&fx, &unsafe_, &ident(0, "safeCount")));
    }

    #[test]
    fn test_array_and_deferred_follow_first_argument() {
        let mut fx = Fixture::new();
        let string = fx.register(TypeInfo::new(TypeKind::String));
        let number = fx.register(TypeInfo::new(TypeKind::Number));

        let names = TypeInfo::new(TypeKind::Array {
            arguments: vec![string],
        });
        let pending = TypeInfo::new(TypeKind::Deferred {
            arguments: vec![number],
        });
        let bare = TypeInfo::new(TypeKind::Array { arguments: vec![] });

        assert!(!check(&fx, &names, &ident(0, "names")));
        assert!(check(&fx, &pending, &ident(0, "pending")));
        assert!(check(&fx, &bare, &ident(0, "rows")));
    }

    #[test]
    fn test_scalars_are_safe() {
        let fx = Fixture::new();
        let expr = ident(0, "value");
        let kinds = [
            TypeKind::Number,
            TypeKind::Boolean,
            TypeKind::BigInt,
            TypeKind::Null,
            TypeKind::Undefined,
            TypeKind::Void,
            TypeKind::Never,
            TypeKind::Unknown,
            TypeKind::StringLiteral {
                value: String::new(),
            },
        ];

        for kind in kinds {
            assert!(check(&fx, &TypeInfo::new(kind.clone()), &expr), "{kind:?}");
        }
    }

    #[test]
    fn test_string_and_object_need_prefix_or_escape() {
        let fx = Fixture::new();
        for kind in [TypeKind::String, TypeKind::Object] {
            let ty = TypeInfo::new(kind);
            assert!(!check(&fx, &ty, &ident(0, "userInput")));
            assert!(check(&fx, &ty, &ident(0, "safeInput")));
            assert!(check(&fx, &ty, &call(0, "escapeHtml(userInput)", "escapeHtml")));
            assert!(check(&fx, &ty, &call(0, "Html.EscapeHTML(userInput)", "Html.EscapeHTML")));
            assert!(!check(&fx, &ty, &call(0, "unescapeHtml(userInput)", "unescapeHtml")));
        }
    }

    #[test]
    fn test_recursive_types_terminate() {
        // type Nested = string | Nested[]
        let mut table = TypeTable::new();
        let nested = TypeId::new(0);
        table.insert(
            nested,
            TypeInfo::new(TypeKind::Union {
                members: vec![TypeId::new(1), TypeId::new(2)],
            }),
        );
        table.insert(TypeId::new(1), TypeInfo::new(TypeKind::String));
        table.insert(
            TypeId::new(2),
            TypeInfo::new(TypeKind::Array {
                arguments: vec![nested],
            }),
        );
        // type Pending = Promise<Pending>
        table.insert(
            TypeId::new(3),
            TypeInfo::new(TypeKind::Deferred {
                arguments: vec![TypeId::new(3)],
            }),
        );
        let rules = Rules::default();

        let ty = table.get(nested);
        assert!(is_safe(&table, &rules, ty, &ident(0, "safeNested")));
        assert!(!is_safe(&table, &rules, ty, &ident(0, "nested")));
        assert!(is_safe(&table, &rules, table.get(TypeId::new(3)), &ident(0, "pending")));
    }

    #[test]
    fn test_recursive_document_is_checked() {
        let json = r#"{
            "file": "nested.tsx",
            "source": "<div>{safeX}</div>",
            "root": {
                "kind": "element", "tag": "div", "span": {"start": 0, "end": 18},
                "children": [{
                    "kind": "expression_container", "span": {"start": 5, "end": 12},
                    "expression": {"kind": "identifier", "span": {"start": 6, "end": 11}}
                }]
            },
            "types": {
                "types": [
                    {"id": 0, "kind": "union", "members": [1, 2]},
                    {"id": 1, "kind": "string"},
                    {"id": 2, "kind": "array", "arguments": [0]}
                ],
                "locations": [{"span": {"start": 6, "end": 11}, "type": 0}]
            }
        }"#;
        let document = markguard_core::document::Document::from_json(json).unwrap();

        assert!(crate::check_document(&document, &Rules::default()).is_empty());
    }
}
