//! The catalog of findings.
//!
//! Codes are stable and shared with editor integrations:
//! - `88601` - unescaped content in a native element
//! - `88602` - content escaped twice
//! - `88603` - unnecessary `safe` attribute
//! - `88604` - unescaped content passed to a component

use std::fmt;

use crate::diagnostics::Severity;

/// Every kind of finding the analyzer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A value that may contain markup is rendered inside a native element.
    Xss,

    /// A `safe` element contains content that is already escaped.
    ///
    /// Either a nested element or an explicit `escapeHtml(...)` call.
    DoubleEscape,

    /// A `safe` attribute guards content that can never carry markup.
    UnusedSafe,

    /// A value that may contain markup is passed as children to a component.
    ///
    /// Components cannot take the `safe` attribute, so the value itself has
    /// to be escaped.
    ComponentXss,
}

impl DiagnosticKind {
    /// Returns the stable numeric code.
    pub fn code(&self) -> u32 {
        match self {
            DiagnosticKind::Xss => 88601,
            DiagnosticKind::DoubleEscape => 88602,
            DiagnosticKind::UnusedSafe => 88603,
            DiagnosticKind::ComponentXss => 88604,
        }
    }

    /// Returns the kind's name, e.g. `"UnusedSafe"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Xss => "Xss",
            DiagnosticKind::DoubleEscape => "DoubleEscape",
            DiagnosticKind::UnusedSafe => "UnusedSafe",
            DiagnosticKind::ComponentXss => "ComponentXss",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnusedSafe => Severity::Warning,
            DiagnosticKind::Xss | DiagnosticKind::DoubleEscape | DiagnosticKind::ComponentXss => {
                Severity::Error
            }
        }
    }

    /// Returns the catalog message.
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::Xss => "xss-prone content is rendered without the `safe` attribute",
            DiagnosticKind::DoubleEscape => "content inside a `safe` element is escaped twice",
            DiagnosticKind::UnusedSafe => {
                "the `safe` attribute is used on content that cannot contain markup"
            }
            DiagnosticKind::ComponentXss => "xss-prone content is passed as children to a component",
        }
    }

    /// Returns the catalog suggestion.
    pub fn help(&self) -> &'static str {
        match self {
            DiagnosticKind::Xss => {
                "add the `safe` attribute to the element, wrap the value in `escapeHtml()`, or prefix the variable name with `safe`"
            }
            DiagnosticKind::DoubleEscape => {
                "remove either the `safe` attribute or the inner escaping"
            }
            DiagnosticKind::UnusedSafe => "remove the `safe` attribute",
            DiagnosticKind::ComponentXss => {
                "wrap the value in `escapeHtml()` or prefix the variable name with `safe`; components do not accept the `safe` attribute"
            }
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
