//! Bundled template manifest types and parsing

use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest file name inside a bundle root
pub const MANIFEST_FILE: &str = "template.yaml";

/// Bundle manifest (`<bundle root>/template.yaml`)
/// Describes which template tree ships with the tool and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Display name of the template
    pub name: String,

    /// Semver tag of the vendored template
    pub version: String,

    /// Archive URL the template was vendored from
    #[serde(default)]
    pub source: Option<String>,

    /// Directory holding the template tree, relative to the bundle root
    pub root: String,
}

impl BundleManifest {
    /// Parse and validate a manifest
    pub fn from_yaml(content: &str) -> Result<Self> {
        let manifest: BundleManifest =
            serde_yaml::from_str(content).context("Failed to parse bundle manifest")?;
        manifest.parsed_version()?;

        let root = Path::new(&manifest.root);
        if manifest.root.is_empty() || root.is_absolute() || manifest.root.contains("..") {
            anyhow::bail!("Bundle root '{}' must be a relative directory", manifest.root);
        }
        Ok(manifest)
    }

    /// The manifest version as semver, leading `v` allowed
    pub fn parsed_version(&self) -> Result<Version> {
        let cleaned = self.version.strip_prefix('v').unwrap_or(&self.version);
        Version::parse(cleaned)
            .map_err(|e| anyhow::anyhow!("Invalid template version '{}': {}", self.version, e))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize bundle manifest")
    }
}

/// A bundled template on disk
#[derive(Debug, Clone)]
pub struct Bundle {
    pub manifest: BundleManifest,
    /// Absolute path of the template tree
    pub tree: PathBuf,
}

impl Bundle {
    /// Read the manifest in `bundle_root` and locate the template tree
    pub fn open(bundle_root: &Path) -> Result<Self> {
        let manifest_path = bundle_root.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let manifest = BundleManifest::from_yaml(&content)
            .with_context(|| format!("Invalid bundle manifest {}", manifest_path.display()))?;

        let tree = bundle_root.join(&manifest.root);
        if !tree.is_dir() {
            anyhow::bail!(
                "Bundled template tree '{}' not found in {}",
                manifest.root,
                bundle_root.display()
            );
        }

        Ok(Self { manifest, tree })
    }
}
