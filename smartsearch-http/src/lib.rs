//! Minimal single-shot HTTP client with safe logging and flexible auth.
//!
//! - Request options: headers, `Auth`, timeout
//! - Exactly one request per call; no retries, backoff, or rate limiting
//! - `get_json`/`post_json` decode 2xx bodies and report any other status
//!   as [`HttpError::Api`]
//! - `get_status`/`post_status` hand back the raw [`StatusCode`] so a caller
//!   can treat a rejection as an answer rather than a failure
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), smartsearch_http::HttpError> {
//! let client = smartsearch_http::HttpClient::new("https://api.example.com/v1/items")?;
//! let got: serde_json::Value = client
//!     .get_json(smartsearch_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Security: `Auth::Bearer` values are sanitized before use, and logs only
//! ever include the auth kind (bearer/header/none), not the secret.
//!
//! Observability: structured `tracing` events are emitted for request start,
//! responses, decode failures, and API errors; body snippets are always
//! capped, and full request bodies appear at `trace` level only.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Cap applied to logged body snippets and error-message fallbacks.
const SNIPPET_MAX: usize = 500;

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

// ==============================
// Auth & request options
// ==============================

/// Authentication strategies supported by the client.
///
/// ```
/// use smartsearch_http::Auth;
///
/// let bearer = Auth::Bearer("token");
/// match bearer {
///     Auth::Bearer(value) => assert_eq!(value, "token"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// `Authorization: Bearer <token>`, sanitized before use.
    Bearer(&'a str),
    /// Custom header (services that auth via e.g. `X-Api-Key`).
    Header {
        name: HeaderName,
        value: HeaderValue,
    },
    None,
}

/// Per-request tuning knobs.
///
/// ```
/// use smartsearch_http::{Auth, RequestOpts};
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     auth: Some(Auth::Bearer("token")),
///     ..Default::default()
/// };
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
}

// ==============================
// Client
// ==============================

/// HTTP client anchored to one endpoint URL.
///
/// The smartsearch crates each talk to exactly one URL per concern, so the
/// client takes the full endpoint at construction instead of a base plus
/// per-call paths.
#[derive(Clone, Debug)]
pub struct HttpClient {
    endpoint: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client for the given endpoint.
    ///
    /// ```no_run
    /// use smartsearch_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com/usage")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(endpoint: &str) -> Result<Self, HttpError> {
        let endpoint = Url::parse(endpoint).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            endpoint,
            inner,
            default_timeout: Duration::from_secs(15),
        })
    }

    /// Override the default request timeout.
    ///
    /// ```no_run
    /// use smartsearch_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com/usage")?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// The endpoint this client is anchored to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// GET the endpoint and decode a 2xx JSON body into `T`.
    pub async fn get_json<T>(&self, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let (status, bytes) = self.dispatch::<()>(Method::GET, None, opts).await?;
        Self::decode(status, &bytes)
    }

    /// POST a JSON body to the endpoint and decode a 2xx JSON response into `T`.
    pub async fn post_json<B, T>(&self, body: &B, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (status, bytes) = self.dispatch(Method::POST, Some(body), opts).await?;
        Self::decode(status, &bytes)
    }

    /// GET the endpoint and report the raw status code.
    ///
    /// Non-2xx statuses are `Ok`: the caller decides what a rejection means.
    /// Only network-level failures produce `Err`.
    pub async fn get_status(&self, opts: RequestOpts<'_>) -> Result<StatusCode, HttpError> {
        let (status, _) = self.dispatch::<()>(Method::GET, None, opts).await?;
        Ok(status)
    }

    /// POST a JSON body and report the raw status code. See [`Self::get_status`].
    pub async fn post_status<B>(
        &self,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<StatusCode, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let (status, _) = self.dispatch(Method::POST, Some(body), opts).await?;
        Ok(status)
    }

    // Build, log, and send exactly one request; read the full body.
    async fn dispatch<B>(
        &self,
        method: Method,
        body: Option<&B>,
        opts: RequestOpts<'_>,
    ) -> Result<(StatusCode, Vec<u8>), HttpError>
    where
        B: Serialize + ?Sized,
    {
        let mut rb = self.inner.request(method.clone(), self.endpoint.clone());

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        rb = rb.timeout(timeout);

        // Serialize the body ourselves so the exact bytes can be trace-logged.
        if let Some(b) = body {
            let bytes = serde_json::to_vec(b)
                .map_err(|e| HttpError::Build(format!("serialize request body: {e}")))?;
            tracing::trace!(request_body=%snippet(&bytes), "http.request.body");
            rb = rb
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        let auth_kind = match &opts.auth {
            Some(Auth::Bearer(_)) => "bearer",
            Some(Auth::Header { .. }) => "header",
            Some(Auth::None) | None => "none",
        };
        if let Some(auth) = &opts.auth {
            match auth {
                Auth::Bearer(token) => {
                    let token = sanitize_bearer(token)?;
                    rb = rb.bearer_auth(token);
                }
                Auth::Header { name, value } => {
                    rb = rb.header(name, value);
                }
                Auth::None => {}
            }
        }

        tracing::debug!(
            method=%method,
            host_path=%host_path(&self.endpoint),
            timeout_ms=timeout.as_millis() as u64,
            auth_kind,
            has_body=%body.is_some(),
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(
                host_path=%host_path(&self.endpoint),
                message=%message,
                "http.network_error.send"
            );
            HttpError::Network(message)
        })?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(
                host_path=%host_path(&self.endpoint),
                %status,
                message=%message,
                "http.network_error.body"
            );
            HttpError::Network(message)
        })?;

        tracing::debug!(
            %status,
            duration_ms=t0.elapsed().as_millis() as u64,
            body_len=bytes.len(),
            "http.response"
        );
        tracing::trace!(body_snippet=%snippet(&bytes), "http.response.body_snippet");

        Ok((status, bytes.to_vec()))
    }

    fn decode<T>(status: StatusCode, bytes: &[u8]) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let snip = snippet(bytes);
        if status.is_success() {
            return serde_json::from_slice::<T>(bytes).map_err(|e| {
                tracing::warn!(
                    %status,
                    serde_err=%e.to_string(),
                    body_snippet=%snip,
                    "http.response.decode_error"
                );
                HttpError::Decode(e.to_string(), snip)
            });
        }

        let message = extract_error_message(bytes);
        tracing::warn!(
            %status,
            message=%message,
            body_snippet=%snip,
            "http.error"
        );
        Err(HttpError::Api { status, message })
    }
}

// ==============================
// Helpers
// ==============================

/// Best-effort human-readable message out of an error body.
fn extract_error_message(body: &[u8]) -> String {
    // OpenAI style: {"error":{"message":"..."}}
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    // Generic: {"message":"..."} or {"detail":"..."} or {"error":"..."}
    #[derive(Deserialize)]
    struct FlatMessage {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(env) = serde_json::from_slice::<ErrorEnvelope>(body) {
        return env.error.message;
    }
    if let Ok(m) = serde_json::from_slice::<FlatMessage>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.detail.is_empty() {
            return m.detail;
        }
        if !m.error.is_empty() {
            return m.error;
        }
    }
    snippet(body)
}

fn host_path(url: &Url) -> String {
    format!("{}{}", url.domain().unwrap_or("-"), url.path())
}

fn snippet(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > SNIPPET_MAX {
        // The cap can land inside a multibyte character; only char
        // boundaries are legal cut points.
        let mut end = SNIPPET_MAX;
        while !snip.is_char_boundary(end) {
            end -= 1;
        }
        snip.truncate(end);
        snip.push_str("...");
    }
    snip
}

fn sanitize_bearer(raw: &str) -> Result<String, HttpError> {
    // Trim outer spaces/quotes, then strip all ASCII whitespace; pasted keys
    // routinely pick up both.
    let mut token = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    token.retain(|ch| !ch.is_ascii_whitespace());

    if !token.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if token.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    // Validate the header value upfront for a clear error.
    HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_quotes_and_whitespace() {
        assert_eq!(sanitize_bearer("  \"sk-abc\"  ").unwrap(), "sk-abc");
        assert_eq!(sanitize_bearer("sk-a\tb\nc").unwrap(), "sk-abc");
        assert_eq!(sanitize_bearer("'sk-abc'").unwrap(), "sk-abc");
    }

    #[test]
    fn sanitize_rejects_non_ascii() {
        assert!(matches!(
            sanitize_bearer("sk-ключ"),
            Err(HttpError::Build(_))
        ));
    }

    #[test]
    fn sanitize_rejects_control_bytes() {
        assert!(matches!(
            sanitize_bearer("sk-ab\u{1b}cd"),
            Err(HttpError::Build(_))
        ));
    }

    #[test]
    fn snippet_caps_long_bodies() {
        let body = vec![b'x'; SNIPPET_MAX * 2];
        let snip = snippet(&body);
        assert_eq!(snip.len(), SNIPPET_MAX + 3);
        assert!(snip.ends_with("..."));
    }

    #[test]
    fn snippet_cap_lands_on_a_char_boundary() {
        // 200 three-byte chars; the cap falls inside the 167th.
        let body = "漢".repeat(200).into_bytes();
        let snip = snippet(&body);
        assert!(snip.ends_with("..."));
        let kept = snip.trim_end_matches("...");
        assert_eq!(kept.len(), SNIPPET_MAX - SNIPPET_MAX % 3);
        assert!(kept.chars().all(|c| c == '漢'));
    }

    #[test]
    fn error_message_prefers_the_openai_envelope() {
        let body = br#"{"error":{"message":"Authentication Fails"}}"#;
        assert_eq!(extract_error_message(body), "Authentication Fails");
    }

    #[test]
    fn error_message_falls_back_to_flat_fields() {
        assert_eq!(
            extract_error_message(br#"{"message":"nope"}"#),
            "nope"
        );
        assert_eq!(
            extract_error_message(br#"{"detail":"missing token"}"#),
            "missing token"
        );
        assert_eq!(
            extract_error_message(br#"{"error":"bad key"}"#),
            "bad key"
        );
    }

    #[test]
    fn error_message_falls_back_to_a_snippet() {
        assert_eq!(extract_error_message(b"plain text"), "plain text");
    }

    #[test]
    fn invalid_endpoint_is_a_url_error() {
        assert!(matches!(
            HttpClient::new("not a url"),
            Err(HttpError::Url(_))
        ));
    }
}
