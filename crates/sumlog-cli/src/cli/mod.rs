//! CLI for sumlog.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use sumlog_core::candidates;
use sumlog_core::config::{self, RunConfig, SumlogConfig};
use sumlog_core::pipeline::{self, RunSummary};
use sumlog_core::sink::Sink;

/// Printed on stdout when no argument survives filtering.
pub const NO_FILES_MESSAGE: &str = "No valid files specified";

/// Compute SHA-384 checksums of files and append them to a checksum log.
#[derive(Debug, Parser)]
#[command(name = "sumlog")]
#[command(about = "Concurrent SHA-384 checksums, appended to a log", long_about = None)]
pub struct Cli {
    /// Write checksums to stdout instead of the checksum log.
    #[arg(short = 'i')]
    pub stdout: bool,

    /// Print only the digest, without the file name.
    #[arg(short = 'c')]
    pub checksum_only: bool,

    /// Checksum log file name, placed next to the sumlog executable (default checksum.txt).
    #[arg(short = 'o', value_name = "NAME")]
    pub output: Option<String>,

    /// Write lines in argument order instead of completion order.
    #[arg(long)]
    pub ordered: bool,

    /// Maximum number of files open for hashing at once.
    #[arg(long, value_name = "N")]
    pub max_open: Option<usize>,

    /// Files to checksum. Directories, missing paths and sumlog itself are skipped.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Merge flags over file defaults into the immutable run configuration.
    pub fn run_config(&self, defaults: &SumlogConfig, self_exe: &Path) -> RunConfig {
        let name = self.output.as_deref().unwrap_or(&defaults.output_name);
        RunConfig {
            emit_stdout: self.stdout,
            checksum_only: self.checksum_only,
            output: candidates::destination(self_exe, name),
            max_open_files: self.max_open.unwrap_or(defaults.max_open_files),
            ordered: self.ordered || defaults.ordered,
        }
    }
}

pub async fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let defaults = config::load_or_default()?;
    tracing::debug!("loaded config: {:?}", defaults);
    let self_exe = std::env::current_exe().context("locate running executable")?;

    if let Some(summary) = execute(&cli, &defaults, &self_exe).await? {
        tracing::debug!("run summary: {:?}", summary);
    }
    Ok(())
}

/// Filter arguments, open the sink and run the pipeline.
/// Returns `None` when there was nothing to hash; the sink is never opened then.
pub async fn execute(
    cli: &Cli,
    defaults: &SumlogConfig,
    self_exe: &Path,
) -> Result<Option<RunSummary>> {
    let cfg = cli.run_config(defaults, self_exe);
    let files = candidates::collect(&cli.files, self_exe);
    if files.is_empty() {
        println!("{}", NO_FILES_MESSAGE);
        return Ok(None);
    }

    // Fail fast: no destination, no hashing.
    let sink = Sink::open(&cfg)?;
    let (summary, sink) = pipeline::run(&cfg, files, sink).await?;
    // Closes the checksum log only after every task has reported.
    drop(sink);
    Ok(Some(summary))
}

#[cfg(test)]
mod tests;
