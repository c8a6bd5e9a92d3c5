//! Zip archive extraction shared by remote templates and vendored bundles

use anyhow::{Context, Result};
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use zip::ZipArchive;

/// Extract a zip archive into `destination`, returning the number of files written
///
/// If every entry lives under one top-level directory (GitHub's
/// `<repo>-<ref>/...` layout) that directory is stripped. Entries whose path
/// would escape `destination` are rejected.
pub fn extract_zip(zip_bytes: &[u8], destination: &Path) -> Result<usize> {
    let mut archive =
        ZipArchive::new(Cursor::new(zip_bytes)).context("Failed to read zip archive")?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        let path = file
            .enclosed_name()
            .ok_or_else(|| anyhow::anyhow!("Archive entry '{}' has an unsafe path", file.name()))?;
        entries.push(path);
    }

    let common_root = common_root(&entries);

    fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create directory: {}", destination.display()))?;

    let mut written = 0;
    for (i, entry_path) in entries.iter().enumerate() {
        let relative = match &common_root {
            Some(root) => entry_path.strip_prefix(root).unwrap_or(entry_path),
            None => entry_path.as_path(),
        };
        if relative.as_os_str().is_empty() {
            continue;
        }

        let mut file = archive.by_index(i)?;
        let target = destination.join(relative);

        if file.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .with_context(|| format!("Failed to read archive entry '{}'", file.name()))?;
        fs::write(&target, &contents)
            .with_context(|| format!("Failed to write file: {}", target.display()))?;

        // Keep scripts executable
        #[cfg(unix)]
        if let Some(mode) = file.unix_mode().filter(|mode| mode & 0o111 != 0) {
            use std::os::unix::fs::PermissionsExt;
            let mut permissions = fs::metadata(&target)?.permissions();
            permissions.set_mode(permissions.mode() | (mode & 0o111));
            fs::set_permissions(&target, permissions)
                .with_context(|| format!("Failed to set permissions on {}", target.display()))?;
        }

        written += 1;
    }

    Ok(written)
}

/// The single top-level directory shared by every entry, if there is one
fn common_root(entries: &[PathBuf]) -> Option<PathBuf> {
    let first = first_component(entries.first()?)?;
    let mut nested = false;

    for entry in entries {
        if first_component(entry)? != first {
            return None;
        }
        nested |= entry.components().count() > 1;
    }

    nested.then(|| PathBuf::from(first))
}

fn first_component(path: &Path) -> Option<&std::ffi::OsStr> {
    match path.components().next()? {
        Component::Normal(name) => Some(name),
        _ => None,
    }
}
