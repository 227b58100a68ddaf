//! Probe for web-search API keys.
//!
//! The search provider exposes a usage endpoint that answers 200 for a key in
//! good standing, which makes it a free probe: a GET with the key under test
//! and no request body.

use crate::{KeyCheckError, KeyVerdict, Result, Service};
use smartsearch_common::KeyRef;
use smartsearch_http::{Auth, HttpClient, RequestOpts};
use std::time::Duration;

/// Usage endpoint of the search provider.
pub const DEFAULT_SEARCH_USAGE_URL: &str = "https://api.tavily.com/usage";

/// Validates web-search API keys against the provider's usage endpoint.
#[derive(Clone, Debug)]
pub struct SearchKeyCheck {
    endpoint: String,
    timeout: Option<Duration>,
}

impl Default for SearchKeyCheck {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_USAGE_URL.to_string(),
            timeout: None,
        }
    }
}

impl SearchKeyCheck {
    /// Checker for the default usage endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe a different usage endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the transport's default request timeout for the probe.
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Send the probe and report the verdict. Same contract as
    /// [`crate::chat::ChatKeyCheck::verify`].
    pub async fn verify(&self, api_key: &str) -> Result<KeyVerdict> {
        let key = KeyRef::from_secret(api_key);
        let client = HttpClient::new(&self.endpoint)?;
        let opts = RequestOpts {
            timeout: self.timeout,
            auth: Some(Auth::Bearer(api_key)),
            ..Default::default()
        };

        let t0 = std::time::Instant::now();
        let status = client.get_status(opts).await?;
        let verdict = KeyVerdict::from_status(status);
        tracing::debug!(
            service=%Service::SearchUsage,
            key=%key,
            %status,
            valid=%verdict.is_valid(),
            elapsed_ms=t0.elapsed().as_millis() as u64,
            "keys.search.verify"
        );
        Ok(verdict)
    }

    /// Like [`Self::verify`], but a rejected key becomes
    /// [`KeyCheckError::InvalidKey`].
    pub async fn ensure_valid(&self, api_key: &str) -> Result<()> {
        match self.verify(api_key).await? {
            KeyVerdict::Valid => Ok(()),
            KeyVerdict::Invalid { status } => Err(KeyCheckError::InvalidKey {
                service: Service::SearchUsage,
                key: KeyRef::from_secret(api_key),
                status,
            }),
        }
    }
}
