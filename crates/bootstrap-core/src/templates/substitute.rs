//! Placeholder substitution in file contents and file names
//!
//! Tokens are matched literally. There is no escaping: a token that happens to
//! appear in a binary file is replaced like any other occurrence.

use super::walker;
use crate::error::SetupError;
use crate::identity::ProjectIdentity;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Suffix marking template files, stripped from final names
pub const TEMPLATE_SUFFIX: &str = "-template";

/// Content placeholders, in application order
fn content_rules(identity: &ProjectIdentity) -> [(&'static str, &str); 6] {
    [
        ("<PACKAGE_NAME_FULL>", &identity.kebab_name),
        ("<VERSION>", &identity.version),
        ("<PUBLIC_LIB_NAME>", &identity.library_name),
        ("<TEST_LIB_NAME>", &identity.test_name),
        ("<PACKAGE_NAME>", &identity.kebab_name),
        ("<PACKAGE_NAME_UPPER_CAMEL>", &identity.upper_camel_name),
    ]
}

/// File and directory name placeholders, in application order
fn name_rules(identity: &ProjectIdentity) -> [(&'static str, &str); 3] {
    [
        ("__PACKAGE_NAME_FULL__", &identity.kebab_name),
        ("__PACKAGE_NAME__", &identity.kebab_name),
        ("__PACKAGE_NAME_UPPER_CAMEL__", &identity.upper_camel_name),
    ]
}

/// Replace every content placeholder in `bytes`
pub fn substitute_content(bytes: &[u8], identity: &ProjectIdentity) -> Vec<u8> {
    let mut out = bytes.to_vec();
    for (token, value) in content_rules(identity) {
        out = replace_all(&out, token.as_bytes(), value.as_bytes());
    }
    out
}

/// Substitute name placeholders in every component of a relative path and
/// strip the `-template` marker from the final one
pub fn substitute_name(path: &Path, identity: &ProjectIdentity) -> PathBuf {
    let components: Vec<Component<'_>> = path.components().collect();
    let last = components.len().saturating_sub(1);
    let mut out = PathBuf::new();

    for (i, component) in components.into_iter().enumerate() {
        let Component::Normal(name) = component else {
            out.push(component.as_os_str());
            continue;
        };
        let Some(name) = name.to_str() else {
            out.push(name);
            continue;
        };

        let mut name = name.to_string();
        for (token, value) in name_rules(identity) {
            name = name.replace(token, value);
        }
        if i == last {
            name = name.replacen(TEMPLATE_SUFFIX, "", 1);
        }
        out.push(name);
    }
    out
}

fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

/// Rewrite every file below `root`: contents first, then the name
///
/// The full file list is taken before the first rename. A file is written back
/// under its original name and renamed afterwards, so an interruption leaves
/// substituted content under the old name. Directories whose names carried
/// placeholders are recreated under their new names and removed once empty.
/// Returns the number of files processed.
pub async fn substitute_all(root: &Path, identity: &ProjectIdentity) -> Result<usize, SetupError> {
    let files = walker::collect_files(root).map_err(|source| SetupError::Substitution {
        path: root.to_path_buf(),
        source,
    })?;

    let mut renamed_dirs = BTreeSet::new();

    for file in &files {
        let relative = file.strip_prefix(root).unwrap_or(file);
        let renamed = substitute_name(relative, identity);

        rewrite_contents(file, identity).await?;

        if renamed.components().count() != relative.components().count() {
            tracing::warn!(
                path = %relative.display(),
                "placeholder expands to an empty name, keeping original file name"
            );
        } else if renamed.as_path() != relative {
            let target = root.join(&renamed);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| SetupError::Substitution {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
            fs::rename(file, &target)
                .await
                .map_err(|source| SetupError::Substitution {
                    path: file.clone(),
                    source,
                })?;
            tracing::debug!(from = %relative.display(), to = %renamed.display(), "renamed template file");
        }

        for ancestor in relative.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if substitute_dir_name(ancestor, identity) != ancestor {
                renamed_dirs.insert(root.join(ancestor));
            }
        }
    }

    remove_abandoned_dirs(renamed_dirs).await?;

    tracing::info!(files = files.len(), root = %root.display(), "template substitution complete");
    Ok(files.len())
}

async fn rewrite_contents(file: &Path, identity: &ProjectIdentity) -> Result<(), SetupError> {
    let io_err = |source| SetupError::Substitution {
        path: file.to_path_buf(),
        source,
    };

    let original = fs::read(file).await.map_err(io_err)?;
    let substituted = substitute_content(&original, identity);

    let mut handle = fs::File::create(file).await.map_err(io_err)?;
    handle.write_all(&substituted).await.map_err(io_err)?;
    handle.sync_all().await.map_err(io_err)?;
    Ok(())
}

/// Like `substitute_name`, without touching the `-template` marker
fn substitute_dir_name(path: &Path, identity: &ProjectIdentity) -> PathBuf {
    path.components()
        .map(|component| match component.as_os_str().to_str() {
            Some(name) => OsString::from(
                name_rules(identity)
                    .iter()
                    .fold(name.to_string(), |acc, (token, value)| acc.replace(token, value)),
            ),
            None => component.as_os_str().to_os_string(),
        })
        .collect()
}

/// Remove directories that became empty after their files moved, deepest first
async fn remove_abandoned_dirs(dirs: BTreeSet<PathBuf>) -> Result<(), SetupError> {
    for dir in dirs.into_iter().rev() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => return Err(SetupError::Substitution { path: dir, source }),
        };
        let is_empty = entries
            .next_entry()
            .await
            .map_err(|source| SetupError::Substitution {
                path: dir.clone(),
                source,
            })?
            .is_none();
        if is_empty {
            fs::remove_dir(&dir)
                .await
                .map_err(|source| SetupError::Substitution { path: dir, source })?;
        }
    }
    Ok(())
}
