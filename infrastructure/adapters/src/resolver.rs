use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use domain_file::{model::vo::RemoteFileInfo, service::RemoteMetadataService};
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Clone, Deserialize, Debug)]
pub struct HttpResolverConfig {
    #[serde(default = "Default::default")]
    http_header: HashMap<String, String>,
    #[serde(default = "HttpResolverConfig::default_user_agent")]
    user_agent: String,
    /// Per-request timeout. Deadlines live here at the edge, not in the
    /// core.
    #[serde(default = "HttpResolverConfig::default_timeout_msecs")]
    timeout_msecs: u64,
}

impl Default for HttpResolverConfig {
    fn default() -> Self {
        Self {
            http_header: Default::default(),
            user_agent: Self::default_user_agent(),
            timeout_msecs: Self::default_timeout_msecs(),
        }
    }
}

impl HttpResolverConfig {
    pub fn default_user_agent() -> String {
        "FileHandle/1.0".to_string()
    }

    fn default_timeout_msecs() -> u64 {
        10 * 1000
    }
}

/// Metadata-only resolver over HTTP `HEAD`.
pub struct HttpMetadataResolver {
    client: Client,
}

impl HttpMetadataResolver {
    pub fn new(config: &HttpResolverConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .user_agent(&config.user_agent)
                .default_headers(HeaderMap::try_from(&config.http_header.to_owned())?)
                .timeout(Duration::from_millis(config.timeout_msecs))
                .build()?,
        })
    }
}

#[async_trait]
impl RemoteMetadataService for HttpMetadataResolver {
    async fn fetch(&self, url: &Url) -> anyhow::Result<RemoteFileInfo> {
        let response = self.client.head(url.clone()).send().await?;
        if let Err(e) = response.error_for_status_ref() {
            tracing::error!("Metadata request for url: {url} failed: {e}");
            return Err(e.into());
        }
        Ok(info_from_headers(url, response.headers()))
    }
}

fn info_from_headers(url: &Url, headers: &HeaderMap) -> RemoteFileInfo {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        // Strip parameters such as `; charset=utf-8`.
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let size = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok());
    let name = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(filename_from_disposition)
        .or_else(|| filename_from_url(url));

    RemoteFileInfo {
        content_type,
        size,
        name,
    }
}

/// `filename="cat.jpg"` out of a Content-Disposition value.
fn filename_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

fn filename_from_url(url: &Url) -> Option<String> {
    url.path_segments()?
        .last()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
