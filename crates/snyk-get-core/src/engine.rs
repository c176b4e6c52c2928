//! Acquisition engine: retry control and source orchestration.
//!
//! Drives fetch -> verify -> install against an ordered list of sources,
//! retrying transient failures with linear backoff and aborting on
//! conditions no retry can change.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::artifact::ArtifactName;
use crate::install;
use crate::io::fetch::{self, FetchError};
use crate::io::verify::{self, Verification};
use crate::platform::UnsupportedPlatform;
use crate::reporter::Reporter;
use crate::source::Source;
use crate::version::VersionSelector;

/// Failures that stop the whole acquisition. They are host- or
/// artifact-level, so neither another attempt nor another source can
/// change the outcome.
#[derive(Error, Debug)]
pub enum AbortError {
    /// The host has no published binary.
    #[error(transparent)]
    UnsupportedPlatform(#[from] UnsupportedPlatform),

    /// The checksum sidecar was absent or empty; an unverifiable binary is
    /// never installed.
    #[error("checksum sidecar unavailable at {url}: {reason}")]
    MissingChecksum {
        /// Sidecar URL.
        url: String,
        /// What the server answered.
        reason: String,
    },
}

/// Failures that consume one attempt against the current source and may
/// succeed on retry.
#[derive(Error, Debug)]
pub enum RetryError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered outside the 2xx range for the artifact.
    #[error("server returned HTTP {status} for {url}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Artifact URL.
        url: String,
    },

    /// The downloaded bytes did not hash to the published digest. Plausibly
    /// a truncated or corrupted transfer, so worth retrying.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Digest the sidecar published.
        expected: String,
        /// Digest of the bytes that arrived.
        actual: String,
    },
}

impl From<FetchError> for RetryError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => Self::Http(e),
            FetchError::Io(e) => Self::Io(e),
            FetchError::Status { status, url } => Self::Status { status, url },
            // Only raised for sidecar bodies; the engine aborts on it before
            // this conversion can run.
            FetchError::EmptySidecar { url } => {
                Self::Io(std::io::Error::other(format!("empty body for {url}")))
            }
        }
    }
}

/// Terminal outcome of an acquisition run.
#[derive(Error, Debug)]
pub enum AcquireError {
    /// A non-retryable condition stopped the run.
    #[error("aborted: {0}")]
    Aborted(#[from] AbortError),

    /// Every configured source ran out of retry budget.
    #[error("all {sources} download sources exhausted; last failure: {last}")]
    Exhausted {
        /// How many sources were tried.
        sources: usize,
        /// The failure that ended the final attempt.
        last: RetryError,
    },
}

/// Retry bounds for a single source.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts per source before moving to the next.
    pub attempts: u32,
    /// Backoff unit; the sleep after attempt `n` is `n * backoff_unit`.
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    /// Policy with `attempts` tries per source and the standard 10-second
    /// linear backoff unit.
    pub fn new(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff_unit: Duration::from_secs(10),
        }
    }

    /// Delay inserted after the given (1-based) failed attempt.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Suspension point between retries, injectable so tests can observe the
/// backoff schedule without waiting it out.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `delay`.
    async fn sleep(&self, delay: Duration);
}

/// Default sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

static DEFAULT_SLEEPER: TokioSleeper = TokioSleeper;

/// The verified file installed under its canonical name.
#[derive(Debug, Clone)]
pub struct InstalledArtifact {
    /// Canonical path of the installed binary.
    pub path: PathBuf,
    /// Lowercase hex SHA-256 the install was verified against.
    pub digest: String,
    /// The source that served the artifact.
    pub source: Source,
}

/// Ephemeral per-attempt record. Created at the start of an attempt, feeds
/// the structured logs, and is discarded with the attempt.
#[derive(Debug, Clone)]
struct DownloadRecord<'a> {
    source: &'a Source,
    artifact: &'a str,
    attempt: u32,
}

/// Request for a full acquisition run.
pub struct AcquireRequest<'a, R: Reporter> {
    /// HTTP client to issue requests with.
    pub client: &'a Client,
    /// Resolved artifact names for the host platform.
    pub artifact: &'a ArtifactName,
    /// Release channel or literal version to download.
    pub version: &'a VersionSelector,
    /// Ordered, de-duplicated source list.
    pub sources: &'a [Source],
    /// Retry bounds applied per source.
    pub retry: RetryPolicy,
    /// Directory the download and the final install land in.
    pub work_dir: &'a Path,
    /// Progress sink.
    pub reporter: &'a R,
    /// Backoff sleeper.
    pub sleeper: &'a dyn Sleeper,
}

impl<'a, R: Reporter> AcquireRequest<'a, R> {
    /// Build a request with the default (tokio timer) sleeper.
    pub fn new(
        client: &'a Client,
        artifact: &'a ArtifactName,
        version: &'a VersionSelector,
        sources: &'a [Source],
        retry: RetryPolicy,
        work_dir: &'a Path,
        reporter: &'a R,
    ) -> Self {
        Self {
            client,
            artifact,
            version,
            sources,
            retry,
            work_dir,
            reporter,
            sleeper: &DEFAULT_SLEEPER,
        }
    }

    /// Substitute the backoff sleeper.
    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Execute the acquisition.
    pub async fn execute(self) -> Result<InstalledArtifact, AcquireError> {
        acquire(self).await
    }
}

enum AttemptOutcome {
    Success(InstalledArtifact),
    Retry(RetryError),
    Abort(AbortError),
}

enum SourceOutcome {
    Success(InstalledArtifact),
    Exhausted(RetryError),
    Abort(AbortError),
}

/// Drive the acquisition against each source in order.
///
/// The attempt counter is fresh for every source. The first success wins;
/// an abort stops everything, including sources not yet tried.
pub async fn acquire<R: Reporter>(
    req: AcquireRequest<'_, R>,
) -> Result<InstalledArtifact, AcquireError> {
    let mut last = RetryError::Io(std::io::Error::other("no download sources configured"));

    for source in req.sources {
        req.reporter
            .info(&format!("Fetching {} from {source}", req.artifact.remote_name));

        match try_source(&req, source).await {
            SourceOutcome::Success(installed) => {
                req.reporter.done(&req.artifact.local_name, "installed");
                return Ok(installed);
            }
            SourceOutcome::Exhausted(err) => {
                req.reporter
                    .warning(&format!("Giving up on {source}: {err}"));
                last = err;
            }
            SourceOutcome::Abort(err) => {
                req.reporter.error(&err.to_string());
                return Err(AcquireError::Aborted(err));
            }
        }
    }

    Err(AcquireError::Exhausted {
        sources: req.sources.len(),
        last,
    })
}

async fn try_source<R: Reporter>(req: &AcquireRequest<'_, R>, source: &Source) -> SourceOutcome {
    let mut attempt: u32 = 1;
    loop {
        let record = DownloadRecord {
            source,
            artifact: &req.artifact.remote_name,
            attempt,
        };
        tracing::debug!(
            source = %record.source,
            artifact = record.artifact,
            attempt = record.attempt,
            limit = req.retry.attempts,
            "download attempt"
        );

        match run_attempt(req, source).await {
            AttemptOutcome::Success(installed) => return SourceOutcome::Success(installed),
            AttemptOutcome::Abort(err) => return SourceOutcome::Abort(err),
            AttemptOutcome::Retry(err) => {
                tracing::warn!(source = %source, attempt, error = %err, "attempt failed");
                req.reporter.failed(&req.artifact.remote_name, &err.to_string());

                if attempt >= req.retry.attempts {
                    return SourceOutcome::Exhausted(err);
                }
                let delay = req.retry.backoff_after(attempt);
                req.reporter
                    .info(&format!("Retrying in {} seconds...", delay.as_secs()));
                req.sleeper.sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

async fn run_attempt<R: Reporter>(req: &AcquireRequest<'_, R>, source: &Source) -> AttemptOutcome {
    let url = source.artifact_url(req.version, req.artifact);
    let dest = req.work_dir.join(&req.artifact.remote_name);

    if let Err(err) =
        fetch::fetch_artifact(req.client, &req.artifact.remote_name, &url, &dest, req.reporter)
            .await
    {
        return AttemptOutcome::Retry(err.into());
    }

    // A served-but-absent sidecar means nothing can ever be verified for
    // this download; a dropped connection, on the other hand, says nothing.
    let checksum_url = source.checksum_url(req.version, req.artifact);
    let expected = match fetch::fetch_checksum(req.client, &checksum_url).await {
        Ok(digest) => digest,
        Err(FetchError::Status { status, url }) => {
            discard(&dest).await;
            return AttemptOutcome::Abort(AbortError::MissingChecksum {
                url,
                reason: format!("HTTP {status}"),
            });
        }
        Err(FetchError::EmptySidecar { url }) => {
            discard(&dest).await;
            return AttemptOutcome::Abort(AbortError::MissingChecksum {
                url,
                reason: "empty response body".to_string(),
            });
        }
        Err(err) => {
            discard(&dest).await;
            return AttemptOutcome::Retry(err.into());
        }
    };

    req.reporter.verifying(&req.artifact.remote_name);
    match verify::verify(&dest, &expected).await {
        Ok(Verification::Match) => {}
        Ok(Verification::Mismatch { actual }) => {
            discard(&dest).await;
            return AttemptOutcome::Retry(RetryError::ChecksumMismatch { expected, actual });
        }
        Err(err) => {
            discard(&dest).await;
            return AttemptOutcome::Retry(RetryError::Io(err));
        }
    }

    req.reporter.installing(&req.artifact.local_name);
    let canonical = req.work_dir.join(&req.artifact.local_name);
    if let Err(err) = install::install(&dest, &canonical) {
        discard(&dest).await;
        return AttemptOutcome::Retry(RetryError::Io(err));
    }

    AttemptOutcome::Success(InstalledArtifact {
        path: canonical,
        digest: expected,
        source: source.clone(),
    })
}

async fn discard(dest: &Path) {
    tokio::fs::remove_file(dest).await.ok();
}
