//! Streaming checksum verification.

use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

/// Read size for the streaming digest. Chunking never affects the result;
/// it only bounds memory use.
const CHUNK_SIZE: usize = 64 * 1024;

/// Outcome of comparing a file against an expected digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Digest matched exactly.
    Match,
    /// Digest differed; carries what the file actually hashed to.
    Mismatch {
        /// Lowercase hex digest of the file on disk.
        actual: String,
    },
}

impl Verification {
    /// Whether the verification succeeded.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Stream `path` through SHA-256 and compare the lowercase hex digest to
/// `expected_hex` by exact string equality.
pub async fn verify(path: &Path, expected_hex: &str) -> std::io::Result<Verification> {
    let actual = sha256_file(path).await?;
    if actual == expected_hex {
        Ok(Verification::Match)
    } else {
        Ok(Verification::Mismatch { actual })
    }
}

/// Compute the SHA-256 of a file in bounded-size chunks.
pub async fn sha256_file(path: &Path) -> std::io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
