//! Probe for chat-completion API keys.
//!
//! Sends one minimal completion request with the key under test and maps the
//! status to a [`KeyVerdict`]. The probe costs a handful of tokens on a valid
//! key; rejected keys are answered before any generation happens.

use crate::{KeyCheckError, KeyVerdict, Result, Service};
use serde_json::json;
use smartsearch_common::{DEFAULT_CHAT_COMPLETIONS_URL, DEFAULT_CHAT_MODEL, KeyRef};
use smartsearch_http::{Auth, HttpClient, RequestOpts};
use std::time::Duration;

/// Fixed probe message. Short on purpose; the reply is discarded.
const PROBE_CONTENT: &str = "Hello!";

/// Validates chat-completion API keys against a live endpoint.
#[derive(Clone, Debug)]
pub struct ChatKeyCheck {
    model: String,
    endpoint: String,
    timeout: Option<Duration>,
}

impl Default for ChatKeyCheck {
    fn default() -> Self {
        Self {
            model: DEFAULT_CHAT_MODEL.to_string(),
            endpoint: DEFAULT_CHAT_COMPLETIONS_URL.to_string(),
            timeout: None,
        }
    }
}

impl ChatKeyCheck {
    /// Checker for the default model and endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe with a different model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Probe a different completions endpoint (any OpenAI-compatible URL).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the transport's default request timeout for the probe.
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Send the probe and report the verdict.
    ///
    /// `Err` means the probe itself could not run (bad endpoint URL, network
    /// failure); a rejected key is `Ok(KeyVerdict::Invalid { .. })`, not an
    /// error.
    pub async fn verify(&self, api_key: &str) -> Result<KeyVerdict> {
        let key = KeyRef::from_secret(api_key);
        let client = HttpClient::new(&self.endpoint)?;
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": PROBE_CONTENT}],
        });
        let opts = RequestOpts {
            timeout: self.timeout,
            auth: Some(Auth::Bearer(api_key)),
            ..Default::default()
        };

        let t0 = std::time::Instant::now();
        let status = client.post_status(&body, opts).await?;
        let verdict = KeyVerdict::from_status(status);
        tracing::debug!(
            service=%Service::ChatCompletions,
            key=%key,
            %status,
            valid=%verdict.is_valid(),
            elapsed_ms=t0.elapsed().as_millis() as u64,
            "keys.chat.verify"
        );
        Ok(verdict)
    }

    /// Like [`Self::verify`], but a rejected key becomes
    /// [`KeyCheckError::InvalidKey`].
    pub async fn ensure_valid(&self, api_key: &str) -> Result<()> {
        match self.verify(api_key).await? {
            KeyVerdict::Valid => Ok(()),
            KeyVerdict::Invalid { status } => Err(KeyCheckError::InvalidKey {
                service: Service::ChatCompletions,
                key: KeyRef::from_secret(api_key),
                status,
            }),
        }
    }
}
