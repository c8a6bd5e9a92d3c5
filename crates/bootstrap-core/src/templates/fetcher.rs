//! Template sources and fetching of remote templates
//!
//! Remote templates are zip archives (GitHub's `archive/<ref>.zip` layout or any
//! URL serving a zip). They are downloaded and extracted straight into the
//! destination directory.

use super::archive;
use crate::error::SetupError;
use anyhow::{Context, Result};
use std::path::Path;
use url::Url;

/// Sentinel selecting the bundled template
pub const BUNDLED: &str = "bundled";

/// Where the template comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(Url),
    Bundled,
}

impl TemplateSource {
    /// Parse a template source string
    ///
    /// Accepts `bundled`, `github:<owner>/<repo>[#<ref>]` and plain
    /// `http(s)://` archive URLs.
    pub fn parse(raw: &str) -> Result<Self, SetupError> {
        let raw = raw.trim();

        if raw.eq_ignore_ascii_case(BUNDLED) {
            return Ok(Self::Bundled);
        }

        if let Some(shorthand) = raw.strip_prefix("github:") {
            return github_archive_url(shorthand).map(Self::Remote);
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw).map_err(|e| {
                SetupError::Configuration(format!("Invalid template URL '{}': {}", raw, e))
            })?;
            return Ok(Self::Remote(url));
        }

        Err(SetupError::Configuration(format!(
            "Unrecognized template source '{}' (expected '{}', 'github:<owner>/<repo>' or an http(s) URL)",
            raw, BUNDLED
        )))
    }
}

/// `owner/repo#ref` -> `https://github.com/owner/repo/archive/ref.zip`
fn github_archive_url(shorthand: &str) -> Result<Url, SetupError> {
    let (repo_path, git_ref) = match shorthand.split_once('#') {
        Some((path, git_ref)) => (path, git_ref),
        None => (shorthand, "master"),
    };

    let invalid = || {
        SetupError::Configuration(format!(
            "Invalid GitHub template 'github:{}' (expected github:<owner>/<repo>[#<ref>])",
            shorthand
        ))
    };

    let (owner, repo) = repo_path.split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') || git_ref.is_empty() {
        return Err(invalid());
    }

    let mut url = Url::parse("https://github.com").map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .push(owner)
        .push(repo)
        .push("archive")
        .push(&format!("{}.zip", git_ref));
    Ok(url)
}

/// Capability of populating a directory from a remote template
#[allow(async_fn_in_trait)]
pub trait TemplateFetch {
    /// Download the template at `url` and extract it into `destination`
    async fn fetch_into(&self, url: &Url, destination: &Path) -> Result<()>;
}

/// Template fetcher - downloads zip archives over HTTP
pub struct TemplateFetcher {
    client: reqwest::Client,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Download raw bytes from a URL, failing on non-success status codes
    pub async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        tracing::debug!(%url, "downloading template archive");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch template from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch template from {}: HTTP {}",
                url,
                response.status()
            );
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read template archive from {}", url))?;
        Ok(bytes.to_vec())
    }
}

impl TemplateFetch for TemplateFetcher {
    async fn fetch_into(&self, url: &Url, destination: &Path) -> Result<()> {
        let bytes = self.download(url).await?;
        let written = archive::extract_zip(&bytes, destination)
            .with_context(|| format!("Failed to extract template from {}", url))?;
        tracing::info!(%url, files = written, "remote template extracted");
        Ok(())
    }
}
