use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use reqwest::{
    Client,
    header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA, USER_AGENT},
};
use tracing::debug;

use crate::{
    config::RadioSettings,
    error::{Error, Result},
    radio::{MetadataSource, search_term_from_payload},
    types::{ChannelMetadataEnvelope, SearchTerm},
    utils,
};

/// The metadata endpoint refuses obvious non-browser agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/68.0.3440.106 Safari/537.36";

/// HTTP client for the channel metadata endpoint.
///
/// Stateless apart from its settings; every call asks for the minute bucket
/// derived from the local clock plus the configured offset.
#[derive(Debug, Clone)]
pub struct RadioClient {
    client: Client,
    settings: RadioSettings,
    timeout: Duration,
}

impl RadioClient {
    pub fn new(settings: RadioSettings, timeout: Duration) -> Self {
        Self::with_client(Client::new(), settings, timeout)
    }

    /// Create a client with a custom reqwest::Client
    pub fn with_client(client: Client, settings: RadioSettings, timeout: Duration) -> Self {
        Self {
            client,
            settings,
            timeout,
        }
    }

    pub fn channel(&self) -> &str {
        &self.settings.channel
    }

    /// Full URL for the current minute bucket.
    pub fn current_url(&self) -> String {
        let bucket = utils::timestamp_bucket(
            Local::now().naive_local(),
            self.settings.time_offset_hours,
        );
        format!(
            "{base}/{channel}/timestamp/{bucket}",
            base = self.settings.metadata_url.trim_end_matches('/'),
            channel = self.settings.channel,
            bucket = bucket
        )
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers
    }
}

#[async_trait]
impl MetadataSource for RadioClient {
    async fn fetch_current_track(&self) -> Result<SearchTerm> {
        let url = self.current_url();
        debug!("Fetching channel metadata: {}", url);

        let response = self
            .client
            .get(&url)
            .headers(Self::headers())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                service: "radio metadata",
                status,
            });
        }

        let body = response.text().await?;
        let payload: ChannelMetadataEnvelope =
            serde_json::from_str(&body).map_err(|e| Error::malformed(e.to_string()))?;
        search_term_from_payload(payload)
    }
}
