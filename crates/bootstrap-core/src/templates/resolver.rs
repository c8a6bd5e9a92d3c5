//! Populating the destination from the selected template source

use super::copier;
use super::fetcher::{TemplateFetch, TemplateSource};
use super::manifest::Bundle;
use crate::error::SetupError;
use std::path::Path;

/// Ensure `destination` holds the template files; no substitution happens here
///
/// Returns the number of files the bundled copy wrote, or `None` for remote
/// templates (the fetch reports its own count).
pub async fn resolve_template<F: TemplateFetch>(
    source: &TemplateSource,
    destination: &Path,
    bundle_root: &Path,
    fetcher: &F,
) -> Result<Option<usize>, SetupError> {
    match source {
        TemplateSource::Remote(url) => {
            tracing::info!(%url, destination = %destination.display(), "fetching remote template");
            fetcher
                .fetch_into(url, destination)
                .await
                .map_err(SetupError::TemplateAcquisition)?;
            Ok(None)
        }
        TemplateSource::Bundled => {
            let bundle = Bundle::open(bundle_root).map_err(SetupError::TemplateAcquisition)?;
            tracing::info!(
                template = %bundle.manifest.name,
                version = %bundle.manifest.version,
                "copying bundled template"
            );
            let copied = copier::copy_tree(&bundle.tree, destination)
                .await
                .map_err(SetupError::TemplateAcquisition)?;
            Ok(Some(copied))
        }
    }
}
