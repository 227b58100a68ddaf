//! Shared types and utilities for the smartsearch crates.
//!
//! This crate defines the completion-endpoint configuration, the redacted
//! credential fingerprint used everywhere a key must be named, and the
//! `tracing` initializer shared by binaries and integration tests. It is
//! intentionally lightweight so that every crate in the workspace can depend
//! on it without pulling in HTTP or provider machinery.
//!
//! # Overview
//!
//! - [`CompletionConfig`]: endpoint/model/credential triple for an
//!   OpenAI-compatible chat-completion service
//! - [`KeyRef`]: non-reversible credential reference for logs and errors
//! - [`observability`]: centralized tracing/logging initialization
//!
//! # Examples
//!
//! ```rust
//! use smartsearch_common::{CompletionConfig, DEFAULT_CHAT_MODEL};
//!
//! let cfg = CompletionConfig::new("sk-test-0123456789abcd");
//! assert_eq!(cfg.model, DEFAULT_CHAT_MODEL);
//! assert_eq!(cfg.key_ref().to_string(), "…abcd");
//! ```
use std::fmt;

pub mod observability;

/// Default model sent to the chat-completion service.
pub const DEFAULT_CHAT_MODEL: &str = "deepseek-chat";

/// Default chat-completion endpoint (OpenAI-compatible request shape).
pub const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://api.deepseek.com/chat/completions";

/// Configuration for an OpenAI-compatible completion endpoint.
///
/// Holds the credential, model identifier, and target URL as one unit so a
/// consumer can be bound to a single endpoint at construction. The struct is
/// deliberately not serializable: credentials are supplied by the caller at
/// runtime and never written out by this workspace.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Bearer token presented to the service.
    pub api_key: String,
    /// Model identifier, e.g. `deepseek-chat`.
    pub model: String,
    /// Full endpoint URL the completion request is POSTed to.
    pub endpoint: String,
}

impl CompletionConfig {
    /// Configuration for the default service and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            endpoint: DEFAULT_CHAT_COMPLETIONS_URL.to_string(),
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint URL (gateways, self-hosted deployments, stubs).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Redacted reference to the configured credential.
    pub fn key_ref(&self) -> KeyRef {
        KeyRef::from_secret(&self.api_key)
    }
}

impl fmt::Debug for CompletionConfig {
    // Never expose the credential through `{:?}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &self.key_ref())
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Non-reversible reference to an API credential.
///
/// Keeps at most the last four characters of the secret, and only when the
/// secret is long enough that the tail reveals nothing useful. This is the
/// only form in which a credential may appear in errors or logs.
///
/// ```rust
/// use smartsearch_common::KeyRef;
///
/// assert_eq!(KeyRef::from_secret("sk-test-0123456789abcd").to_string(), "…abcd");
/// assert_eq!(KeyRef::from_secret("short").to_string(), "…");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct KeyRef {
    tail: String,
}

impl KeyRef {
    const TAIL_CHARS: usize = 4;
    /// Secrets at or below this length keep no tail at all; otherwise the
    /// tail alone could reconstruct most of the credential.
    const MIN_SECRET_CHARS: usize = 8;

    /// Fingerprint a credential. The secret itself is not retained.
    pub fn from_secret(secret: &str) -> Self {
        let len = secret.chars().count();
        let tail = if len > Self::MIN_SECRET_CHARS {
            secret.chars().skip(len - Self::TAIL_CHARS).collect()
        } else {
            String::new()
        };
        Self { tail }
    }
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "…{}", self.tail)
    }
}

impl fmt::Debug for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyRef(…{})", self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ref_keeps_only_the_tail() {
        let key_ref = KeyRef::from_secret("sk-live-9f8e7d6c5b4a");
        assert_eq!(key_ref.to_string(), "…5b4a");
    }

    #[test]
    fn key_ref_hides_short_secrets_entirely() {
        for secret in ["", "x", "abcd", "abcdefgh"] {
            assert_eq!(KeyRef::from_secret(secret).to_string(), "…");
        }
    }

    #[test]
    fn key_ref_never_contains_the_secret() {
        let secret = "sk-live-9f8e7d6c5b4a";
        let rendered = KeyRef::from_secret(secret).to_string();
        assert!(!rendered.contains(secret));
        assert!(rendered.len() < secret.len());
    }

    #[test]
    fn key_ref_is_char_boundary_safe() {
        // Multibyte characters must not split at byte boundaries.
        let key_ref = KeyRef::from_secret("пароль-секрет");
        assert_eq!(key_ref.to_string(), "…крет");
    }

    #[test]
    fn config_debug_redacts_the_credential() {
        let cfg = CompletionConfig::new("sk-test-0123456789abcd");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sk-test-0123456789abcd"));
        assert!(rendered.contains("…abcd"));
    }

    #[test]
    fn config_defaults_and_overrides() {
        let cfg = CompletionConfig::new("k")
            .with_model("deepseek-reasoner")
            .with_endpoint("https://gateway.internal/v1/chat/completions");
        assert_eq!(cfg.model, "deepseek-reasoner");
        assert_eq!(cfg.endpoint, "https://gateway.internal/v1/chat/completions");

        let defaults = CompletionConfig::new("k");
        assert_eq!(defaults.model, DEFAULT_CHAT_MODEL);
        assert_eq!(defaults.endpoint, DEFAULT_CHAT_COMPLETIONS_URL);
    }
}
