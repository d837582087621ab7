//! markguard - static XSS checks for JSX-like markup.
//!
//! Loads documents (a markup tree plus the types a host type checker
//! resolved for it) and reports values that may be rendered into markup
//! without escaping, along with redundant or contradictory uses of the
//! `safe` marker.

pub mod config;

mod error;

pub use markguard_analyzer::{Rules, diagnostics};
pub use markguard_core::{Span, document, syntax, types};

pub use error::MarkguardError;

use std::{fs, path::Path};

use log::{debug, info, trace};

use markguard_analyzer::diagnostics::Report;
use markguard_core::document::Document;

use config::AppConfig;

/// Loads and checks documents under one configuration.
///
/// # Examples
///
/// ```rust
/// use markguard::{Analyzer, config::AppConfig};
///
/// let json = r#"{
///     "file": "page.tsx",
///     "source": "<div>{count}</div>",
///     "root": {
///         "kind": "element", "tag": "div", "span": {"start": 0, "end": 18},
///         "children": [{
///             "kind": "expression_container", "span": {"start": 5, "end": 12},
///             "expression": {"kind": "identifier", "span": {"start": 6, "end": 11}}
///         }]
///     },
///     "types": {
///         "types": [{"id": 0, "kind": "number"}],
///         "locations": [{"span": {"start": 6, "end": 11}, "type": 0}]
///     }
/// }"#;
///
/// let analyzer = Analyzer::new(AppConfig::default()).expect("default config is valid");
/// let (_, report) = analyzer.check_source(json).expect("document loads");
/// assert!(report.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    rules: Rules,
}

impl Analyzer {
    /// Create an analyzer from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MarkguardError::Config`] if a configured rule is invalid.
    pub fn new(config: AppConfig) -> Result<Self, MarkguardError> {
        let rules = config.rules().to_rules().map_err(MarkguardError::Config)?;
        debug!(
            marker = rules.marker_attribute(),
            escape_function = rules.escape_function();
            "Rules configured"
        );
        Ok(Self { rules })
    }

    /// Create an analyzer from ready-made rules.
    pub fn with_rules(rules: Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`MarkguardError::Document`] when the JSON is malformed or a
    /// span does not fit the embedded source.
    pub fn load(&self, json: &str) -> Result<Document, MarkguardError> {
        Document::from_json(json).map_err(|err| MarkguardError::new_document_error(err, "<input>"))
    }

    /// Read and parse a JSON document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkguardError::Io`] if the file cannot be read and
    /// [`MarkguardError::Document`] if it does not hold a valid document.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Document, MarkguardError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading document");
        let json = fs::read_to_string(path)?;
        Document::from_json(&json)
            .map_err(|err| MarkguardError::new_document_error(err, path.display().to_string()))
    }

    /// Check one document.
    pub fn check(&self, document: &Document) -> Report {
        let report = markguard_analyzer::check_document(document, &self.rules);
        info!(
            file = document.file(),
            errors = report.error_count(),
            warnings = report.warning_count();
            "Document checked"
        );
        trace!(report:%; "Findings");
        report
    }

    /// Parse and check a JSON document in one step.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::load`].
    pub fn check_source(&self, json: &str) -> Result<(Document, Report), MarkguardError> {
        let document = self.load(json)?;
        let report = self.check(&document);
        Ok((document, report))
    }
}
