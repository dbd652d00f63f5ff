use std::io;
use std::path::Path;

use crate::discovery::files_with_suffix;

/// Copies every file under `input_root` whose name ends with `suffix` to
/// the mirrored relative position under `output_root`, creating parent
/// directories as needed. Sources already inside the resolved output root
/// are skipped, so repeated runs over overlapping trees never copy
/// generated assets onto themselves. Returns the number of files copied.
pub fn copy_by_suffix(input_root: &Path, output_root: &Path, suffix: &str) -> io::Result<usize> {
    let resolved_output = output_root
        .canonicalize()
        .unwrap_or_else(|_| output_root.to_path_buf());
    let mut copied = 0;

    for file in files_with_suffix(input_root, suffix) {
        let resolved = file.canonicalize().unwrap_or_else(|_| file.clone());
        if resolved.starts_with(&resolved_output) {
            continue;
        }

        let relative = file.strip_prefix(input_root).unwrap_or(&file);
        let dest = output_root.join(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&file, &dest)?;
        copied += 1;
    }

    Ok(copied)
}
