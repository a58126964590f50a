//! Fixture helpers shared by integration tests.

use std::fs;
use std::path::{Path, PathBuf};

pub const HELLO_SHA384: &str = "59e1748777448c69de6b800d7a33bbfb9ff1b463e44354c3553bcdb9c666fa90125a3c79f90397bdf5f6a13de828684f";
pub const EMPTY_SHA384: &str = "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b";

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// True if `line` is `<96 lowercase hex>` optionally followed by ` - <path>`.
pub fn parse_success(line: &str) -> Option<(&str, Option<&str>)> {
    let (digest, rest) = match line.split_once(" - ") {
        Some((d, p)) => (d, Some(p)),
        None => (line, None),
    };
    let is_hex = digest.len() == 96 && digest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'));
    is_hex.then_some((digest, rest))
}
