//! Resolved type information supplied by the host type checker.
//!
//! The analyzer never computes types. It asks a [`TypeChecker`] for the type
//! of an expression and, when it needs to look inside a union or a generic
//! container, asks the same checker again. [`TypeTable`] is a checker backed by
//! a precomputed table, which is what the JSON document format carries.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{span::Span, syntax::Node};

/// Handle of a type inside a [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The shape of a resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    /// The unchecked escape hatch, `any`.
    Any,
    Unknown,
    Never,
    String,
    /// A string literal type such as `"primary"`.
    StringLiteral {
        #[serde(default)]
        value: String,
    },
    Number,
    Boolean,
    BigInt,
    Null,
    Undefined,
    Void,
    Object,
    Union {
        members: Vec<TypeId>,
    },
    /// `T[]`; the element type is the first argument.
    Array {
        #[serde(default)]
        arguments: Vec<TypeId>,
    },
    /// A promise-shaped deferred value; the settled type is the first argument.
    Deferred {
        #[serde(default)]
        arguments: Vec<TypeId>,
    },
}

impl TypeKind {
    /// Returns `true` for the plain string type. Literal types do not count.
    pub fn is_string(&self) -> bool {
        matches!(self, TypeKind::String)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, TypeKind::Object)
    }
}

/// The named alias a type was referenced through, e.g. `JSX.Element`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct TypeAlias {
    name: String,
    #[serde(default)]
    scope: Option<String>,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, scope: Option<String>) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }

    /// An alias declared inside a namespace, e.g. `scoped("JSX", "Element")`.
    pub fn scoped(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(name, Some(scope.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the enclosing namespace, if any.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

impl fmt::Display for TypeAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{scope}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for TypeAlias {
    type Err = String;

    /// Parses `Name` or `Scope.Name`; the last dot separates the name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (scope, name) = match s.rsplit_once('.') {
            Some((scope, name)) => (Some(scope), name),
            None => (None, s),
        };
        if name.is_empty() || scope.is_some_and(str::is_empty) {
            return Err(format!("invalid type alias `{s}`"));
        }
        Ok(Self::new(name, scope.map(str::to_string)))
    }
}

/// A resolved type: its shape plus the alias it was reached through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    kind: TypeKind,
    alias: Option<TypeAlias>,
}

impl TypeInfo {
    pub fn new(kind: TypeKind) -> Self {
        Self { kind, alias: None }
    }

    /// Attach the alias this type was referenced through (builder style).
    pub fn with_alias(mut self, alias: TypeAlias) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn alias(&self) -> Option<&TypeAlias> {
        self.alias.as_ref()
    }

    /// Returns `true` if this type was referenced through `alias`.
    pub fn has_alias(&self, alias: &TypeAlias) -> bool {
        self.alias.as_ref() == Some(alias)
    }
}

/// Type queries the analyzer needs from the host.
pub trait TypeChecker {
    /// The type of `node` at its location, or `None` if it cannot be resolved.
    fn type_at_location(&self, node: &Node) -> Option<&TypeInfo>;

    /// The member types of a union; empty for anything else.
    ///
    /// Members that cannot be resolved are left out.
    fn union_members(&self, ty: &TypeInfo) -> Vec<&TypeInfo>;

    /// The first type argument of an array or deferred type.
    fn first_type_argument(&self, ty: &TypeInfo) -> Option<&TypeInfo>;
}

/// A [`TypeChecker`] backed by a precomputed table.
///
/// Expressions are resolved by their exact span.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawTypeTable")]
pub struct TypeTable {
    types: IndexMap<TypeId, TypeInfo>,
    locations: IndexMap<Span, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: TypeId, info: TypeInfo) {
        self.types.insert(id, info);
    }

    /// Record that the expression covering `span` has type `id`.
    pub fn assign(&mut self, span: Span, id: TypeId) {
        self.locations.insert(span, id);
    }

    /// Register a type and assign it to `span` in one step (builder style).
    pub fn with_type_at(mut self, span: Span, id: TypeId, info: TypeInfo) -> Self {
        self.insert(id, info);
        self.assign(span, id);
        self
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeInfo> {
        self.types.get(&id)
    }

    pub fn type_id_at(&self, span: Span) -> Option<TypeId> {
        self.locations.get(&span).copied()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn arguments<'a>(ty: &'a TypeInfo) -> &'a [TypeId] {
        match ty.kind() {
            TypeKind::Array { arguments } | TypeKind::Deferred { arguments } => arguments,
            _ => &[],
        }
    }
}

impl TypeChecker for TypeTable {
    fn type_at_location(&self, node: &Node) -> Option<&TypeInfo> {
        self.type_id_at(node.span()).and_then(|id| self.get(id))
    }

    fn union_members(&self, ty: &TypeInfo) -> Vec<&TypeInfo> {
        match ty.kind() {
            TypeKind::Union { members } => members.iter().filter_map(|id| self.get(*id)).collect(),
            _ => Vec::new(),
        }
    }

    fn first_type_argument(&self, ty: &TypeInfo) -> Option<&TypeInfo> {
        Self::arguments(ty).first().and_then(|id| self.get(*id))
    }
}

/// Serialized form of a [`TypeTable`].
#[derive(Deserialize)]
struct RawTypeTable {
    #[serde(default)]
    types: Vec<RawTypeEntry>,
    #[serde(default)]
    locations: Vec<RawLocation>,
}

#[derive(Deserialize)]
struct RawTypeEntry {
    id: TypeId,
    #[serde(default)]
    alias: Option<TypeAlias>,
    #[serde(flatten)]
    kind: TypeKind,
}

#[derive(Deserialize)]
struct RawLocation {
    span: Span,
    #[serde(rename = "type")]
    ty: TypeId,
}

impl From<RawTypeTable> for TypeTable {
    fn from(raw: RawTypeTable) -> Self {
        let mut table = TypeTable::new();
        for entry in raw.types {
            let info = TypeInfo {
                kind: entry.kind,
                alias: entry.alias,
            };
            table.insert(entry.id, info);
        }
        for location in raw.locations {
            table.assign(location.span, location.ty);
        }
        table
    }
}
