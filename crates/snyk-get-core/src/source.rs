//! Distribution sources and the ordered fallback list.

use std::fmt;

use crate::artifact::ArtifactName;
use crate::version::VersionSelector;

/// Built-in distribution endpoints, in fallback priority order.
pub const DEFAULT_BASE_URLS: [&str; 2] = ["https://static.snyk.io", "https://downloads.snyk.io"];

/// One download endpoint, identified by its base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    base_url: String,
}

impl Source {
    /// Create a source, normalizing away trailing slashes so equality (and
    /// therefore de-duplication) is insensitive to them.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the binary for `version` on this source.
    pub fn artifact_url(&self, version: &VersionSelector, artifact: &ArtifactName) -> String {
        format!(
            "{}/cli/{}/{}",
            self.base_url,
            version.path_segment(),
            artifact.remote_name
        )
    }

    /// URL of the checksum sidecar published next to the binary.
    pub fn checksum_url(&self, version: &VersionSelector, artifact: &ArtifactName) -> String {
        format!("{}.sha256", self.artifact_url(version, artifact))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_url)
    }
}

/// Build the working source list: the caller's preferred endpoint (when it
/// is not already one of the defaults) followed by the built-in defaults in
/// fixed priority order. Every URL appears at most once.
pub fn source_list(preferred: Option<&str>) -> Vec<Source> {
    let defaults: Vec<Source> = DEFAULT_BASE_URLS.into_iter().map(Source::new).collect();
    let mut sources = Vec::with_capacity(defaults.len() + 1);
    if let Some(url) = preferred {
        let source = Source::new(url);
        if !source.base_url.is_empty() && !defaults.contains(&source) {
            sources.push(source);
        }
    }
    sources.extend(defaults);
    sources
}
