//! Artifact and checksum-sidecar fetching.
//!
//! One GET per artifact, streamed to disk in bounded chunks; one GET for the
//! `.sha256` sidecar published next to it.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::reporter::Reporter;

/// Failures raised by a single fetch operation. Classification into
/// retryable-vs-abort happens in the engine, which knows whether the URL
/// was the artifact or its sidecar.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem failure while writing the download.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered outside the 2xx range.
    #[error("server returned HTTP {status} for {url}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// URL the request was issued against.
        url: String,
    },

    /// The sidecar response carried no digest token.
    #[error("checksum sidecar at {url} is empty")]
    EmptySidecar {
        /// Sidecar URL.
        url: String,
    },
}

/// Stream the artifact at `url` into `dest`, reporting progress per chunk.
///
/// Returns the number of bytes written. The destination is created (or
/// truncated) unconditionally; callers discard it on failure.
pub async fn fetch_artifact<R: Reporter>(
    client: &Client,
    name: &str,
    url: &str,
    dest: &Path,
    reporter: &R,
) -> Result<u64, FetchError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    let total = response.content_length();
    reporter.downloading(name, 0, total);

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        reporter.downloading(name, downloaded, total);
    }

    file.flush().await?;
    Ok(downloaded)
}

/// Fetch the `.sha256` sidecar at `url` and extract the expected digest.
///
/// The digest is the first whitespace-delimited token of the body,
/// tolerating `sha256sum`-style trailing metadata on the same line.
pub async fn fetch_checksum(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    match body.split_whitespace().next() {
        Some(token) => Ok(token.to_string()),
        None => Err(FetchError::EmptySidecar {
            url: url.to_string(),
        }),
    }
}
