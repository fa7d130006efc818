//! Manifest sources — where a marketplace document comes from.
//!
//! A manifest can be read from a local file, fetched over HTTP(S), or
//! supplied inline (the Inspector's pasted-text case). Fetch mechanics stay
//! in this module; the rest of the engine only ever sees text.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::SourceError;

/// Default location of the bundled marketplace manifest.
const DEFAULT_MANIFEST_PATH: &str = ".claude-plugin/marketplace.json";

/// Where a marketplace manifest comes from.
#[derive(Debug, Clone)]
pub enum ManifestSource {
    /// A file on the local filesystem.
    Path(PathBuf),

    /// A document fetched over HTTP(S).
    Url(Url),

    /// Raw manifest text supplied directly.
    Inline(String),
}

impl ManifestSource {
    /// Interpret a user-supplied string: an `http://` or `https://` URL
    /// becomes [`ManifestSource::Url`], anything else a filesystem path.
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::Path(PathBuf::from(input)),
        }
    }

    /// Read the manifest text from this source.
    pub async fn read(&self) -> std::result::Result<String, SourceError> {
        match self {
            Self::Path(path) => Ok(tokio::fs::read_to_string(path).await?),
            Self::Url(url) => fetch(url).await,
            Self::Inline(text) => Ok(text.clone()),
        }
    }

    /// Short human-readable label for logs and reports.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Url(url) => url.to_string(),
            Self::Inline(_) => "<inline>".to_owned(),
        }
    }
}

/// Resolve the default manifest path.
///
/// Priority:
/// 1. `$FOUNDRY_MARKETPLACE` environment variable
/// 2. `.claude-plugin/marketplace.json` relative to the working directory
pub fn default_manifest_path() -> PathBuf {
    if let Ok(path) = std::env::var("FOUNDRY_MARKETPLACE") {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_MANIFEST_PATH)
}

async fn fetch(url: &Url) -> std::result::Result<String, SourceError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("foundry/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_default();

    tracing::debug!(url = %url, "fetching manifest");

    let response = client.get(url.clone()).send().await?;

    if !response.status().is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    Ok(response.text().await?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
