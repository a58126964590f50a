//! One result per input file and the log line rendered from it.

use std::path::{Path, PathBuf};

use crate::checksum::HashError;

/// Digest or error text for one file; exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    /// Lowercase hex SHA-384.
    Digest(String),
    /// Human-readable failure, written to the log as-is.
    Failed(String),
}

/// Result of hashing one candidate file. `index` is the file's position in
/// the candidate list and is only used when output must follow input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumResult {
    index: usize,
    source_path: PathBuf,
    outcome: Outcome,
}

impl ChecksumResult {
    pub fn new(index: usize, source_path: PathBuf, hashed: Result<String, HashError>) -> Self {
        let outcome = match hashed {
            Ok(digest) => Outcome::Digest(digest),
            Err(e) => Outcome::Failed(e.to_string()),
        };
        Self {
            index,
            source_path,
            outcome,
        }
    }

    pub fn failed(index: usize, source_path: PathBuf, message: String) -> Self {
        Self {
            index,
            source_path,
            outcome: Outcome::Failed(message),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Digest(_))
    }

    /// Render the log line (without trailing newline):
    /// `<digest>`, `<digest> - <path>`, or the error message alone.
    pub fn render(&self, checksum_only: bool) -> String {
        match &self.outcome {
            Outcome::Failed(msg) => msg.clone(),
            Outcome::Digest(digest) if checksum_only => digest.clone(),
            Outcome::Digest(digest) => format!("{} - {}", digest, self.source_path.display()),
        }
    }
}
