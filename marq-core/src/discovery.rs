use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively lists files under `root` whose name ends with `suffix`
/// (e.g. ".md", ".css"). Order is whatever the walker yields; unreadable
/// entries are skipped.
pub fn files_with_suffix<P: AsRef<Path>>(root: P, suffix: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && e.file_name().to_string_lossy().ends_with(suffix))
    {
        paths.push(entry.path().to_path_buf());
    }

    paths
}
