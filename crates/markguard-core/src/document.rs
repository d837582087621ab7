//! The document interchange format.
//!
//! A [`Document`] bundles one analyzed file: its name, optionally its source
//! text, the markup tree and the resolved type table. Hosts that parse and
//! type-check source hand documents over as JSON:
//!
//! ```
//! # use markguard_core::document::Document;
//! let json = r#"{
//!     "file": "page.tsx",
//!     "source": "<div>{userInput}</div>",
//!     "root": {
//!         "kind": "element", "tag": "div", "span": {"start": 0, "end": 22},
//!         "children": [{
//!             "kind": "expression_container", "span": {"start": 5, "end": 16},
//!             "expression": {"kind": "identifier", "span": {"start": 6, "end": 15}}
//!         }]
//!     },
//!     "types": {
//!         "types": [{"id": 0, "kind": "string"}],
//!         "locations": [{"span": {"start": 6, "end": 15}, "type": 0}]
//!     }
//! }"#;
//!
//! let document = Document::from_json(json).unwrap();
//! assert_eq!(document.file(), "page.tsx");
//! ```

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::{span::Span, syntax::Node, types::TypeTable};

/// Errors raised while loading a [`Document`].
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("span {span} does not fit a source of {source_len} bytes")]
    SpanOutOfBounds { span: Span, source_len: usize },
}

/// One file's tree and types, ready for analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    file: String,
    #[serde(default)]
    source: Option<String>,
    root: Node,
    #[serde(default)]
    types: TypeTable,
}

impl Document {
    /// Create a document without source text.
    pub fn new(file: impl Into<String>, root: Node, types: TypeTable) -> Self {
        Self {
            file: file.into(),
            source: None,
            root,
            types,
        }
    }

    /// Parse a document from JSON and fill in node text from its source.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] when the JSON does not describe a
    /// document, and [`DocumentError::SpanOutOfBounds`] when a node's span
    /// cannot be sliced out of the embedded source.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut document: Document = serde_json::from_str(json)?;
        document.hydrate()?;
        debug!(file = document.file.as_str(), types = document.types.len(); "Document loaded");
        Ok(document)
    }

    /// Attach source text, filling in any node text that is still missing.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::SpanOutOfBounds`] if a span does not fit
    /// `source`.
    pub fn with_source(mut self, source: impl Into<String>) -> Result<Self, DocumentError> {
        self.source = Some(source.into());
        self.hydrate()?;
        Ok(self)
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    fn hydrate(&mut self) -> Result<(), DocumentError> {
        let source = self.source.as_deref();
        self.root
            .hydrate(source)
            .map_err(|span| DocumentError::SpanOutOfBounds {
                span,
                source_len: source.map_or(0, str::len),
            })
    }
}
