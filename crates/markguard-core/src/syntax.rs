//! Markup syntax tree consumed by the analyzer.
//!
//! The tree is produced by an external parser and handed to the analyzer
//! either programmatically (via the constructors below) or through the JSON
//! [`Document`](crate::document::Document) format. The analyzer only reads it.
//!
//! Only the node shapes the analysis distinguishes get their own
//! [`NodeKind`] variant. Every other statement, declaration or expression form
//! is an [`NodeKind::Other`] node that exists so markup nested inside it can
//! still be reached by a whole-tree walk.

use std::fmt;

use serde::Deserialize;

use crate::span::Span;

/// A node of the markup syntax tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    span: Span,
    /// Literal source text covered by `span`.
    #[serde(default)]
    text: String,
    #[serde(flatten)]
    kind: NodeKind,
}

/// The shape of a [`Node`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// A tag with attributes and children, e.g. `<div class="a">...</div>`.
    Element(Element),

    /// An untagged grouping of children, `<>...</>`.
    Fragment {
        #[serde(default)]
        children: Vec<Node>,
    },

    /// A `{...}` slot inside markup. Empty for comment-only containers.
    ExpressionContainer {
        #[serde(default)]
        expression: Option<Box<Node>>,
    },

    /// Plain text between tags.
    Text,

    /// `( expression )`
    Parenthesized { expression: Box<Node> },

    /// `left <operator> right`
    Binary {
        left: Box<Node>,
        operator: BinaryOperator,
        right: Box<Node>,
    },

    /// `condition ? when_true : when_false`
    Conditional {
        condition: Box<Node>,
        when_true: Box<Node>,
        when_false: Box<Node>,
    },

    /// A bare identifier.
    Identifier,

    /// `callee(arguments...)`
    Call {
        callee: Box<Node>,
        #[serde(default)]
        arguments: Vec<Node>,
    },

    /// Any other node; kept only for traversal.
    Other {
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl NodeKind {
    /// Short name of the variant, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Element(_) => "element",
            NodeKind::Fragment { .. } => "fragment",
            NodeKind::ExpressionContainer { .. } => "expression_container",
            NodeKind::Text => "text",
            NodeKind::Parenthesized { .. } => "parenthesized",
            NodeKind::Binary { .. } => "binary",
            NodeKind::Conditional { .. } => "conditional",
            NodeKind::Identifier => "identifier",
            NodeKind::Call { .. } => "call",
            NodeKind::Other { .. } => "other",
        }
    }
}

impl Node {
    /// Create a node from its kind, span and literal source text.
    pub fn new(kind: NodeKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
            kind,
        }
    }

    /// A bare identifier such as `userInput`.
    pub fn identifier(span: Span, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Identifier, span, text)
    }

    /// Plain markup text.
    pub fn markup_text(span: Span, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text, span, text)
    }

    /// A call expression.
    pub fn call(span: Span, text: impl Into<String>, callee: Node, arguments: Vec<Node>) -> Self {
        Self::new(
            NodeKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            span,
            text,
        )
    }

    /// A parenthesized expression.
    pub fn parenthesized(span: Span, text: impl Into<String>, expression: Node) -> Self {
        Self::new(
            NodeKind::Parenthesized {
                expression: Box::new(expression),
            },
            span,
            text,
        )
    }

    /// A binary expression.
    pub fn binary(
        span: Span,
        text: impl Into<String>,
        left: Node,
        operator: BinaryOperator,
        right: Node,
    ) -> Self {
        Self::new(
            NodeKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            span,
            text,
        )
    }

    /// A conditional (ternary) expression.
    pub fn conditional(
        span: Span,
        text: impl Into<String>,
        condition: Node,
        when_true: Node,
        when_false: Node,
    ) -> Self {
        Self::new(
            NodeKind::Conditional {
                condition: Box::new(condition),
                when_true: Box::new(when_true),
                when_false: Box::new(when_false),
            },
            span,
            text,
        )
    }

    /// A `{...}` container, optionally holding an expression.
    pub fn container(span: Span, text: impl Into<String>, expression: Option<Node>) -> Self {
        Self::new(
            NodeKind::ExpressionContainer {
                expression: expression.map(Box::new),
            },
            span,
            text,
        )
    }

    /// A markup element.
    pub fn element(span: Span, text: impl Into<String>, element: Element) -> Self {
        Self::new(NodeKind::Element(element), span, text)
    }

    /// A markup fragment.
    pub fn fragment(span: Span, text: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Fragment { children }, span, text)
    }

    /// Any other node, carrying its children for traversal.
    pub fn other(span: Span, text: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Other { children }, span, text)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Literal source text of this node.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self.kind, NodeKind::Fragment { .. })
    }

    /// Returns `true` for elements and fragments.
    pub fn is_markup(&self) -> bool {
        self.is_element() || self.is_fragment()
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, NodeKind::Identifier)
    }

    pub fn is_call(&self) -> bool {
        matches!(self.kind, NodeKind::Call { .. })
    }

    pub fn is_markup_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The markup children of an element or fragment; empty for anything else.
    pub fn markup_children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Element(element) => &element.children,
            NodeKind::Fragment { children } => children,
            _ => &[],
        }
    }

    /// The inner expression of an expression container.
    pub fn contained_expression(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::ExpressionContainer { expression } => expression.as_deref(),
            _ => None,
        }
    }

    /// Immediate children in source order.
    ///
    /// Element attribute initializers come before the element's children.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Element(element) => element
                .attributes
                .iter()
                .filter_map(|attr| attr.initializer.as_deref())
                .chain(element.children.iter())
                .collect(),
            NodeKind::Fragment { children } | NodeKind::Other { children } => {
                children.iter().collect()
            }
            NodeKind::ExpressionContainer { expression } => expression.as_deref().into_iter().collect(),
            NodeKind::Parenthesized { expression } => vec![expression.as_ref()],
            NodeKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            NodeKind::Conditional {
                condition,
                when_true,
                when_false,
            } => vec![condition.as_ref(), when_true.as_ref(), when_false.as_ref()],
            NodeKind::Call { callee, arguments } => {
                std::iter::once(callee.as_ref()).chain(arguments.iter()).collect()
            }
            NodeKind::Text | NodeKind::Identifier => Vec::new(),
        }
    }

    /// Fill in missing text from `source`, recursively.
    ///
    /// Returns the span that could not be sliced out of `source`, if any.
    pub(crate) fn hydrate(&mut self, source: Option<&str>) -> Result<(), Span> {
        if let (true, Some(source)) = (self.text.is_empty(), source) {
            self.text = slice(source, self.span)?.to_string();
        }

        match &mut self.kind {
            NodeKind::Element(element) => {
                for attribute in &mut element.attributes {
                    attribute.hydrate(source)?;
                }
                for child in &mut element.children {
                    child.hydrate(source)?;
                }
            }
            NodeKind::Fragment { children } | NodeKind::Other { children } => {
                for child in children {
                    child.hydrate(source)?;
                }
            }
            NodeKind::ExpressionContainer { expression } => {
                if let Some(expression) = expression {
                    expression.hydrate(source)?;
                }
            }
            NodeKind::Parenthesized { expression } => expression.hydrate(source)?,
            NodeKind::Binary { left, right, .. } => {
                left.hydrate(source)?;
                right.hydrate(source)?;
            }
            NodeKind::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                condition.hydrate(source)?;
                when_true.hydrate(source)?;
                when_false.hydrate(source)?;
            }
            NodeKind::Call { callee, arguments } => {
                callee.hydrate(source)?;
                for argument in arguments {
                    argument.hydrate(source)?;
                }
            }
            NodeKind::Text | NodeKind::Identifier => {}
        }

        Ok(())
    }
}

/// A markup element: tag name, attributes and children.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    tag: String,
    #[serde(default)]
    attributes: Vec<Attribute>,
    #[serde(default)]
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute to the opening tag (builder style).
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Append a child node (builder style).
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Component tags start with an uppercase letter, e.g. `<UserCard>`.
    pub fn is_component(&self) -> bool {
        self.tag.chars().next().is_some_and(char::is_uppercase)
    }

    /// Find the first attribute whose literal text is exactly `text`.
    pub fn attribute_with_text(&self, text: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.text == text)
    }
}

/// An attribute on an opening tag.
#[derive(Debug, Clone, Deserialize)]
pub struct Attribute {
    name: String,
    span: Span,
    #[serde(default)]
    text: String,
    #[serde(default)]
    initializer: Option<Box<Node>>,
}

impl Attribute {
    /// A bare attribute without a value, such as `safe`.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        let name = name.into();
        Self {
            text: name.clone(),
            name,
            span,
            initializer: None,
        }
    }

    /// An attribute with an initializer, such as `title={label}`.
    pub fn with_initializer(
        name: impl Into<String>,
        span: Span,
        text: impl Into<String>,
        initializer: Node,
    ) -> Self {
        Self {
            name: name.into(),
            span,
            text: text.into(),
            initializer: Some(Box::new(initializer)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Literal source text of the whole attribute.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn initializer(&self) -> Option<&Node> {
        self.initializer.as_deref()
    }

    fn hydrate(&mut self, source: Option<&str>) -> Result<(), Span> {
        if self.text.is_empty() {
            match source {
                Some(source) => self.text = slice(source, self.span)?.to_string(),
                // Without source text a bare attribute reads as its name
                None if self.initializer.is_none() => self.text = self.name.clone(),
                None => {}
            }
        }
        if let Some(initializer) = &mut self.initializer {
            initializer.hydrate(source)?;
        }
        Ok(())
    }
}

/// Operators of binary expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "===")]
    StrictEquals,
    #[serde(rename = "!==")]
    StrictNotEquals,
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    InstanceOf,
    #[serde(rename = "&&")]
    LogicalAnd,
    #[serde(rename = "||")]
    LogicalOr,
    #[serde(rename = "??")]
    NullishCoalescing,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Remainder,
    #[serde(rename = "**")]
    Exponent,
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = "<<")]
    LeftShift,
    #[serde(rename = ">>")]
    RightShift,
    #[serde(rename = ">>>")]
    UnsignedRightShift,
    /// Assignments evaluate to the assigned value.
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubtractAssign,
    #[serde(rename = "*=")]
    MultiplyAssign,
    #[serde(rename = "/=")]
    DivideAssign,
    #[serde(rename = "%=")]
    RemainderAssign,
    #[serde(rename = "**=")]
    ExponentAssign,
    #[serde(rename = "<<=")]
    LeftShiftAssign,
    #[serde(rename = ">>=")]
    RightShiftAssign,
    #[serde(rename = ">>>=")]
    UnsignedRightShiftAssign,
    #[serde(rename = "&=")]
    BitwiseAndAssign,
    #[serde(rename = "|=")]
    BitwiseOrAssign,
    #[serde(rename = "^=")]
    BitwiseXorAssign,
    #[serde(rename = "&&=")]
    LogicalAndAssign,
    #[serde(rename = "||=")]
    LogicalOrAssign,
    #[serde(rename = "??=")]
    NullishAssign,
}

impl BinaryOperator {
    /// Comparison, membership and type tests always evaluate to a boolean.
    pub fn yields_boolean(&self) -> bool {
        matches!(
            self,
            BinaryOperator::StrictEquals
                | BinaryOperator::StrictNotEquals
                | BinaryOperator::Equals
                | BinaryOperator::NotEquals
                | BinaryOperator::GreaterThan
                | BinaryOperator::LessThan
                | BinaryOperator::GreaterThanOrEqual
                | BinaryOperator::LessThanOrEqual
                | BinaryOperator::In
                | BinaryOperator::InstanceOf
        )
    }

    /// The operator as written in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::StrictEquals => "===",
            BinaryOperator::StrictNotEquals => "!==",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::In => "in",
            BinaryOperator::InstanceOf => "instanceof",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::NullishCoalescing => "??",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Exponent => "**",
            BinaryOperator::Comma => ",",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::Assign => "=",
            BinaryOperator::AddAssign => "+=",
            BinaryOperator::SubtractAssign => "-=",
            BinaryOperator::MultiplyAssign => "*=",
            BinaryOperator::DivideAssign => "/=",
            BinaryOperator::RemainderAssign => "%=",
            BinaryOperator::ExponentAssign => "**=",
            BinaryOperator::LeftShiftAssign => "<<=",
            BinaryOperator::RightShiftAssign => ">>=",
            BinaryOperator::UnsignedRightShiftAssign => ">>>=",
            BinaryOperator::BitwiseAndAssign => "&=",
            BinaryOperator::BitwiseOrAssign => "|=",
            BinaryOperator::BitwiseXorAssign => "^=",
            BinaryOperator::LogicalAndAssign => "&&=",
            BinaryOperator::LogicalOrAssign => "||=",
            BinaryOperator::NullishAssign => "??=",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn slice(source: &str, span: Span) -> Result<&str, Span> {
    source.get(span.range()).ok_or(span)
}
