use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

use crate::models::Season;

/// Anything that can produce a parsed season document.
#[async_trait]
pub trait SeasonSource: Send + Sync {
    /// Fetch and parse the document for `season` (e.g. "2024-25").
    async fn fetch_season(&self, season: &str) -> Result<Season>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Season documents served as static JSON: `{base_url}/{season}.json`.
pub struct HttpSource {
    http: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        // A trailing slash makes `join` append instead of replacing the last segment
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .with_context(|| format!("Invalid season data URL: {}", base_url))?;
        Ok(HttpSource { http, base_url })
    }

    pub fn season_url(&self, season: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{}.json", season))
            .with_context(|| format!("Invalid season key: {}", season))
    }
}

#[async_trait]
impl SeasonSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_season(&self, season: &str) -> Result<Season> {
        let url = self.season_url(season)?;
        debug!("Fetching season document from {}", url);

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .context("Season data request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("Season data error {} for {}", resp.status(), url);
        }

        resp.json::<Season>()
            .await
            .with_context(|| format!("Failed to parse season document {}", url))
    }
}

/// Season documents read from a local directory: `{dir}/{season}.json`.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSource { dir: dir.into() }
    }
}

#[async_trait]
impl SeasonSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_season(&self, season: &str) -> Result<Season> {
        let path = self.dir.join(format!("{}.json", season));
        debug!("Reading season document {}", path.display());

        let raw = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_slice(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
