//! Command-line argument definitions for the markguard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the documents to check, the
//! configuration file, how strictly warnings are treated and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the markguard checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Paths to the JSON documents to check
    #[arg(required = true, help = "Paths to the input documents")]
    pub inputs: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Fail on warnings as well as errors
    #[arg(long)]
    pub deny_warnings: bool,
}
