//! SHA-384 of a single file, streamed in fixed-size chunks.
//!
//! Pure function of the file contents: no shared state, so any number of
//! invocations can run in parallel on different files.

use sha2::{Digest, Sha384};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUF_SIZE: usize = 64 * 1024;

/// Per-file hashing failure. Never fatal to a run; the Display text is what
/// ends up in the checksum log in place of a digest.
#[derive(Debug, Error)]
pub enum HashError {
    /// File could not be opened (permissions, vanished since discovery, ...).
    #[error("Unable to open file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// I/O failure while streaming the contents. Not retried.
    #[error("Unable to read file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Compute SHA-384 of a file and return the digest as lowercase hex (96 chars).
/// The file handle is dropped on every return path.
pub fn sha384_path(path: &Path) -> Result<String, HashError> {
    let mut f = File::open(path).map_err(|source| HashError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut hasher = Sha384::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = match f.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(HashError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
