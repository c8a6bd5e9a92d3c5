//! Enumeration of the files a template substitution has to visit

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every regular file below `root`, collected before anything is renamed
///
/// Directories are never returned. Symlinks are not followed and are skipped,
/// since `walkdir` reports them with their own file type.
pub fn collect_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
