//! Core acquisition engine: resolve the host platform, download the matching
//! Snyk CLI binary, verify it against its published checksum, and install it
//! atomically, with retries and source fallback.

pub mod artifact;
pub mod engine;
pub mod install;
pub mod io;
pub mod platform;
pub mod source;
pub mod version;

pub mod reporter;

pub use engine::{AcquireError, AcquireRequest, InstalledArtifact, RetryPolicy, acquire};
pub use reporter::{NullReporter, Reporter};

/// User Agent string for engine HTTP requests
pub const USER_AGENT: &str = concat!("snyk-get/", env!("CARGO_PKG_VERSION"));
