//! CLI logic for the markguard checker.
//!
//! Loads configuration, checks every input document and renders findings
//! through miette.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::{error, info, warn};

use markguard::{Analyzer, MarkguardError};

use error_adapter::{Reportable, report_reportables, to_reportables};

/// Totals over one CLI run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Documents that loaded and were checked.
    pub checked: usize,
    /// Documents that could not be read or parsed.
    pub failed: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    /// Returns `true` if the run should exit successfully.
    pub fn is_success(&self, deny_warnings: bool) -> bool {
        self.failed == 0 && self.errors == 0 && !(deny_warnings && self.warnings > 0)
    }
}

/// Run the markguard CLI application
///
/// Every input is checked even when an earlier one fails to load; load
/// failures are rendered and counted in the returned [`Summary`].
///
/// # Errors
///
/// Returns `MarkguardError` when the configuration cannot be loaded or is
/// invalid.
pub fn run(args: &Args) -> Result<Summary, MarkguardError> {
    info!(inputs = args.inputs.len(); "Checking documents");

    let app_config = config::load_config(args.config.as_ref())?;
    let analyzer = Analyzer::new(app_config)?;

    let mut summary = Summary::default();
    for input in &args.inputs {
        let document = match analyzer.load_file(input) {
            Ok(document) => document,
            Err(err) => {
                emit(&to_reportables(&err));
                summary.failed += 1;
                continue;
            }
        };

        let report = analyzer.check(&document);
        summary.checked += 1;
        summary.errors += report.error_count();
        summary.warnings += report.warning_count();

        emit(&report_reportables(&document, &report));
    }

    info!(
        checked = summary.checked,
        failed = summary.failed,
        errors = summary.errors,
        warnings = summary.warnings;
        "Check finished"
    );

    Ok(summary)
}

fn emit(reportables: &[Reportable<'_>]) {
    for reportable in reportables {
        let rendered = reportable.render();
        if reportable.is_error() {
            error!("{rendered}");
        } else {
            warn!("{rendered}");
        }
    }
}
