use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

use crate::errors::{ShipyardError, ShipyardResult};
use crate::sources::traits::FeedFetcher;

pub const CLIENT_USER_AGENT: &str = "OpulentShipyardMonaco/1.0 RSS Reader";

const FEED_ACCEPT: &str =
    "application/rss+xml, application/atom+xml, application/xml;q=0.9, text/xml;q=0.8, */*;q=0.5";

/// Blocking HTTP fetcher with a bounded timeout and the site's client identifier.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> ShipyardResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(FEED_ACCEPT));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch raw bytes, failing on any non-success status
    pub fn fetch_bytes(&self, url: &str) -> ShipyardResult<Vec<u8>> {
        tracing::debug!(url, timeout_secs = self.timeout.as_secs(), "fetching feed");

        let response = self.client.get(url).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(ShipyardError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> ShipyardResult<String> {
        let bytes = self.fetch_bytes(url)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
