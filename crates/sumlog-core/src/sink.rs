//! Destination for checksum lines: stdout, or the checksum log opened in append mode.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::RunConfig;

/// Failures on the destination. Always fatal to the run.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open checksum log {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write checksum line")]
    Write(#[source] io::Error),
}

/// The single writer target. Owned by the aggregator for the whole run.
pub enum Sink {
    Stdout(io::Stdout),
    File(BufWriter<File>),
}

impl Sink {
    pub fn stdout() -> Self {
        Sink::Stdout(io::stdout())
    }

    /// Open `path` for appending, creating it if absent. Existing lines are kept.
    pub fn append(path: &Path) -> Result<Self, SinkError> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("appending checksums to {}", path.display());
        Ok(Sink::File(BufWriter::new(file)))
    }

    /// Stdout when `emit_stdout` is set (no file is touched), otherwise the
    /// configured checksum log.
    pub fn open(cfg: &RunConfig) -> Result<Self, SinkError> {
        if cfg.emit_stdout {
            Ok(Sink::stdout())
        } else {
            Sink::append(&cfg.output)
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(s) => s.lock().write(buf),
            Sink::File(f) => f.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(s) => s.lock().flush(),
            Sink::File(f) => f.flush(),
        }
    }
}
