//! Error types for markguard operations.
//!
//! This module provides the main error type [`MarkguardError`] which wraps
//! the failures that can occur before analysis starts. Findings are never
//! errors; they come back in a [`Report`](markguard_analyzer::diagnostics::Report).

use std::io;

use thiserror::Error;

use markguard_core::document::DocumentError;

/// The main error type for markguard operations.
#[derive(Debug, Error)]
pub enum MarkguardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{path}: {err}")]
    Document { err: DocumentError, path: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl MarkguardError {
    /// Create a new `Document` error for the input named `path`.
    pub fn new_document_error(err: DocumentError, path: impl Into<String>) -> Self {
        Self::Document {
            err,
            path: path.into(),
        }
    }
}
