use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_NAME: &str = "checksum.txt";
pub const DEFAULT_MAX_OPEN_FILES: usize = 256;

/// Persistent defaults loaded from `~/.config/sumlog/config.toml`.
/// Every field is optional in the file; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SumlogConfig {
    /// Checksum log name, resolved next to the executable.
    pub output_name: String,
    /// Upper bound on files held open for hashing at the same time.
    pub max_open_files: usize,
    /// Write lines in input order instead of completion order.
    pub ordered: bool,
}

impl Default for SumlogConfig {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            max_open_files: DEFAULT_MAX_OPEN_FILES,
            ordered: false,
        }
    }
}

/// Existing config file under the XDG config dirs, if any.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sumlog")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from disk; a missing file means defaults. Nothing is
/// written, the checksum log is the only file this tool creates.
pub fn load_or_default() -> Result<SumlogConfig> {
    match config_path()? {
        Some(path) => load_from(&path),
        None => Ok(SumlogConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<SumlogConfig> {
    if !path.exists() {
        return Ok(SumlogConfig::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: SumlogConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Immutable settings for one run, built once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// `-i`: write to stdout; the checksum log is never opened.
    pub emit_stdout: bool,
    /// `-c`: omit ` - <path>` from success lines.
    pub checksum_only: bool,
    /// Resolved checksum log path (unused when `emit_stdout`).
    pub output: PathBuf,
    pub max_open_files: usize,
    pub ordered: bool,
}

impl RunConfig {
    pub fn new(output: PathBuf) -> Self {
        Self {
            emit_stdout: false,
            checksum_only: false,
            output,
            max_open_files: DEFAULT_MAX_OPEN_FILES,
            ordered: false,
        }
    }
}
