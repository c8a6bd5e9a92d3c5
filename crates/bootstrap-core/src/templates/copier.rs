//! Copying of the bundled template tree into the destination

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Copy every file below `source` into `target_dir`, preserving relative paths
///
/// Returns the number of files copied. Empty directories are recreated too.
pub async fn copy_tree(source: &Path, target_dir: &Path) -> Result<usize> {
    if !source.is_dir() {
        anyhow::bail!("Bundled template not found: {}", source.display());
    }

    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry =
            entry.with_context(|| format!("Failed to walk template: {}", source.display()))?;
        let relative = entry.path().strip_prefix(source)?;
        let target_path = target_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .with_context(|| format!("Failed to create directory: {}", target_path.display()))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target_path)
                .await
                .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}
