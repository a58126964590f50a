//! Turn command-line arguments into the candidate file list and resolve the
//! checksum log path.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Keep arguments that name existing non-directory files, skipping the
/// running executable. Order and duplicates are kept as given.
pub fn collect(args: &[PathBuf], self_exe: &Path) -> Vec<PathBuf> {
    args.iter()
        .filter(|arg| {
            if is_self_executable(arg, self_exe) {
                tracing::debug!("skipping own executable {}", arg.display());
                return false;
            }
            match fs::metadata(arg) {
                Ok(meta) if !meta.is_dir() => true,
                Ok(_) => {
                    tracing::debug!("skipping directory {}", arg.display());
                    false
                }
                Err(e) => {
                    tracing::debug!("skipping {}: {}", arg.display(), e);
                    false
                }
            }
        })
        .cloned()
        .collect()
}

/// True if `path` refers to the running executable: same path, same bare
/// file name (`./sumlog` vs `sumlog`), or same canonical file.
pub fn is_self_executable(path: &Path, self_exe: &Path) -> bool {
    if path == self_exe {
        return true;
    }
    if let Some(name) = self_exe.file_name() {
        if strip_cur_dir(path).as_path() == Path::new(name) {
            return true;
        }
    }
    match (fs::canonicalize(path), fs::canonicalize(self_exe)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Checksum log location: `name` inside the executable's directory, not the
/// current working directory.
pub fn destination(self_exe: &Path, name: &str) -> PathBuf {
    match self_exe.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
