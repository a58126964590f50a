//! Diagnostics go to `~/.local/state/sumlog/sumlog.log`, or stderr when that
//! is unusable. Never stdout: under `-i` stdout carries the checksum lines.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const FILE_FILTER: &str = "info,sumlog=debug,sumlog_core=debug";
const STDERR_FILTER: &str = "warn";

/// Where log records ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// Per-record writer: a clone of the log file handle, or stderr if cloning failed.
enum RecordWriter {
    File(File),
    Stderr,
}

impl Write for RecordWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            RecordWriter::File(f) => f.write(buf),
            RecordWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            RecordWriter::File(f) => f.flush(),
            RecordWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = RecordWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(RecordWriter::File)
            .unwrap_or(RecordWriter::Stderr)
    }
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sumlog")?;
    let log_dir = xdg_dirs.get_state_home().join("sumlog");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log dir {}", log_dir.display()))?;
    Ok(log_dir.join("sumlog.log"))
}

/// Install the global subscriber writing to the state-dir log file.
/// Returns Err if the file can't be opened so the caller can use [`init_stderr`].
pub fn init_file() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(FILE_FILTER))
        .with_writer(LogFile(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;

    tracing::info!("sumlog logging initialized at {}", path.display());
    Ok(path)
}

/// Install a stderr-only subscriber, quieter than the file log.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(STDERR_FILTER))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

/// File logging with stderr fallback. Call once, as early as possible.
pub fn init() -> LogTarget {
    match init_file() {
        Ok(path) => LogTarget::File(path),
        Err(e) => {
            init_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", e);
            LogTarget::Stderr
        }
    }
}
