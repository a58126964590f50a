//! Fan-out one hashing task per candidate file, fan-in through a channel to
//! the single aggregator, and join everything before returning.
//!
//! The aggregator is started before any hashing task, every task handle is
//! joined explicitly, and the aggregator finishes only after the last sender
//! is dropped, so the run cannot return early or hang on a missed signal.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

use crate::aggregator::{self, LineFormat};
use crate::checksum::{self, HashError};
use crate::config::RunConfig;
use crate::report::ChecksumResult;

/// What a finished run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub lines_written: usize,
}

/// Hash every file in `files` and write one line per file to `sink`.
/// Returns the summary and the sink; the sink is flushed but not closed, so
/// the caller decides when a log file handle is released.
///
/// Per-file failures become error lines. Only sink failures and internal
/// task failures are returned as `Err`.
pub async fn run<W>(cfg: &RunConfig, files: Vec<PathBuf>, sink: W) -> Result<(RunSummary, W)>
where
    W: Write + Send + 'static,
{
    run_with_hasher(cfg, files, sink, checksum::sha384_path).await
}

async fn run_with_hasher<W, H>(
    cfg: &RunConfig,
    files: Vec<PathBuf>,
    sink: W,
    hasher: H,
) -> Result<(RunSummary, W)>
where
    W: Write + Send + 'static,
    H: Fn(&Path) -> Result<String, HashError> + Copy + Send + 'static,
{
    let total = files.len();
    let format = LineFormat {
        checksum_only: cfg.checksum_only,
        ordered: cfg.ordered,
    };

    let (tx, rx) = mpsc::unbounded_channel::<ChecksumResult>();
    let aggregator = tokio::task::spawn_blocking(move || aggregator::drain(rx, sink, format));

    // Bounds open file descriptors; every file still gets its own task.
    let gate = Arc::new(Semaphore::new(gate_size(cfg.max_open_files)));
    let mut handles = Vec::with_capacity(total);

    for (index, path) in files.into_iter().enumerate() {
        let permit = Arc::clone(&gate)
            .acquire_owned()
            .await
            .context("open-file gate closed")?;
        let tx = tx.clone();
        let task_path = path.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let hashed = hasher(&task_path);
            match &hashed {
                Ok(_) => tracing::debug!("hashed {}", task_path.display()),
                Err(e) => tracing::warn!("{}", e),
            }
            // Send fails only if the aggregator already bailed on a sink
            // error, which is reported when it is joined below.
            let _ = tx.send(ChecksumResult::new(index, task_path, hashed));
        });
        handles.push((index, path, handle));
    }

    for (index, path, handle) in handles {
        if let Err(e) = handle.await {
            tracing::error!("hashing task for {} failed: {}", path.display(), e);
            let message = format!("Unable to hash file {}: {}", path.display(), e);
            let _ = tx.send(ChecksumResult::failed(index, path, message));
        }
    }
    drop(tx);

    let (sink, tally) = aggregator.await.context("aggregator task join")??;

    let summary = RunSummary {
        files: total,
        succeeded: tally.succeeded,
        failed: tally.failed,
        lines_written: tally.lines(),
    };
    tracing::info!(
        files = summary.files,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "checksum run finished"
    );
    Ok((summary, sink))
}

/// Permits for the open-file gate: at least one, at most what tokio allows.
fn gate_size(max_open_files: usize) -> usize {
    max_open_files.clamp(1, Semaphore::MAX_PERMITS)
}
