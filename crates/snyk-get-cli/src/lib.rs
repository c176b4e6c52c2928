//! snyk-get - download, verify, and install the Snyk CLI
#![allow(missing_docs)]
//!
//! Thin command-line front end over `snyk_get_core`: argument parsing, a
//! console reporter, and exit-code mapping. All acquisition logic lives in
//! the core crate.

pub mod ui;

use std::path::PathBuf;

use clap::Parser;

use snyk_get_core::source::DEFAULT_BASE_URLS;

/// User Agent string (re-exported from the core crate)
pub use snyk_get_core::USER_AGENT;

// No `version` command attribute: the positional argument below owns that
// name, and the tool's own version is rarely what the caller is after.
#[derive(Debug, Parser)]
#[command(name = "snyk-get")]
#[command(author, about = "Download, verify, and install the Snyk CLI")]
pub struct Cli {
    /// Version to download: a literal version (e.g. 1.1290.0) or one of
    /// latest, stable, preview, rc
    pub version: String,

    /// Base URL to try before the built-in download sources
    #[arg(
        long,
        alias = "base_url",
        env = "SNYK_GET_BASE_URL",
        default_value = DEFAULT_BASE_URLS[0]
    )]
    pub base_url: String,

    /// Download attempts per source before falling back to the next
    #[arg(long, default_value_t = 3)]
    pub retry: u32,

    /// Directory to download and install into
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Skip running the installed binary with -v afterwards
    #[arg(long)]
    pub no_version_check: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}
