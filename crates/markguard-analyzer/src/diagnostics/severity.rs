//! Severity levels for diagnostics.
//!
//! This module defines the severity of diagnostic messages,
//! distinguishing between injection risks and advisory warnings.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] marks content that may be rendered unescaped, or
///   escaping that contradicts itself
/// - [`Severity::Warning`] marks a `safe` attribute that does nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A finding that must be fixed.
    Error,

    /// An advisory finding that should be cleaned up.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
