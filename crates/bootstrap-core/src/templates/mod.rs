//! Template acquisition and placeholder substitution
//!
//! This module provides:
//! - Template sources (remote archive URL or the bundled copy)
//! - Remote fetching and bundled copying into the destination
//! - Discovery of template files and placeholder substitution
//! - Vendoring of the bundled template

pub mod archive;
pub mod copier;
pub mod fetcher;
pub mod manifest;
pub mod resolver;
pub mod substitute;
pub mod walker;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use url::Url;

pub use fetcher::{TemplateFetch, TemplateFetcher, TemplateSource, BUNDLED};
pub use manifest::{Bundle, BundleManifest};
pub use resolver::resolve_template;
pub use substitute::{substitute_all, substitute_content, substitute_name};
pub use walker::collect_files;

/// Downloaded archive name inside a bundle root
pub const VENDOR_ARCHIVE: &str = "template.zip";

/// Download and unpack the product's bundled template into `bundle_root`
///
/// An archive already present in the bundle root is reused instead of being
/// downloaded again, and an already extracted tree is left alone.
pub async fn vendor_template<C: ProductConfig>(config: &C, bundle_root: &Path) -> Result<()> {
    let tag = config.vendor_tag();
    let url_str = config.vendor_url(tag);
    let url = Url::parse(&url_str).with_context(|| format!("Invalid template URL: {}", url_str))?;

    let manifest = BundleManifest {
        name: config.display_name().to_string(),
        version: tag.to_string(),
        source: Some(url.to_string()),
        root: format!("template-{}", tag),
    };
    manifest.parsed_version()?;

    std::fs::create_dir_all(bundle_root)
        .with_context(|| format!("Failed to create {}", bundle_root.display()))?;

    println!(
        "{}",
        format!("Vendoring {} template {}...", config.display_name(), tag)
            .cyan()
            .bold()
    );
    println!();

    let archive_path = bundle_root.join(VENDOR_ARCHIVE);
    let zip_bytes = if archive_path.exists() {
        println!("  {} {} already downloaded", "->".blue(), VENDOR_ARCHIVE);
        std::fs::read(&archive_path)
            .with_context(|| format!("Failed to read {}", archive_path.display()))?
    } else {
        print!("  {} Downloading {}...", "->".blue(), url);
        let fetcher = TemplateFetcher::new(config.user_agent());
        match fetcher.download(&url).await {
            Ok(bytes) => {
                std::fs::write(&archive_path, &bytes)
                    .with_context(|| format!("Failed to write {}", archive_path.display()))?;
                println!(" {} ({} bytes)", "done".green(), bytes.len());
                bytes
            }
            Err(e) => {
                println!(" {}", "failed".red());
                return Err(e);
            }
        }
    };

    let tree = bundle_root.join(&manifest.root);
    if tree.exists() {
        println!("  {} {} already extracted", "->".blue(), manifest.root);
    } else {
        print!("  {} Extracting into {}...", "->".blue(), tree.display());
        let written = archive::extract_zip(&zip_bytes, &tree)?;
        println!(" {} ({} files)", "done".green(), written);
    }

    let manifest_path = bundle_root.join(manifest::MANIFEST_FILE);
    std::fs::write(&manifest_path, manifest.to_yaml()?)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    println!();
    println!(
        "{} {} template {} in {}",
        "Vendored".green().bold(),
        config.display_name(),
        tag,
        bundle_root.display()
    );

    Ok(())
}
