//! Credential validation probes for the smartsearch services.
//!
//! Each probe sends one real request to the service it guards and reports the
//! outcome as a [`KeyVerdict`]. A key counts as valid only when the service
//! answers HTTP 200; any other status, including other 2xx codes, is
//! [`KeyVerdict::Invalid`] with the status attached.
//!
//! Two calling conventions are available on every checker:
//! - [`chat::ChatKeyCheck::verify`] answers the question ("is this key
//!   valid?") as data;
//! - [`chat::ChatKeyCheck::ensure_valid`] turns a rejection into a
//!   [`KeyCheckError::InvalidKey`] for callers that want to bail out.
//!
//! Errors and logs never carry the key itself, only a [`KeyRef`] made from
//! its last characters.
//!
//! # Examples
//! ```no_run
//! use smartsearch_keys::chat::ChatKeyCheck;
//!
//! # #[tokio::main]
//! # async fn main() -> smartsearch_keys::Result<()> {
//! let verdict = ChatKeyCheck::new().verify("sk-...").await?;
//! if !verdict.is_valid() {
//!     eprintln!("chat key rejected: {verdict:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod search;

use reqwest::StatusCode;
use smartsearch_common::KeyRef;
use smartsearch_http::HttpError;
use std::fmt;
use thiserror::Error;

pub use chat::ChatKeyCheck;
pub use search::SearchKeyCheck;

/// Which credential a probe exercised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    ChatCompletions,
    SearchUsage,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::ChatCompletions => f.write_str("chat-completions"),
            Service::SearchUsage => f.write_str("search-usage"),
        }
    }
}

/// Outcome of a single probe request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyVerdict {
    Valid,
    /// The service answered, but not with HTTP 200.
    Invalid { status: StatusCode },
}

impl KeyVerdict {
    /// Strict mapping: HTTP 200 and nothing else counts as valid.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::OK {
            KeyVerdict::Valid
        } else {
            KeyVerdict::Invalid { status }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, KeyVerdict::Valid)
    }
}

#[derive(Debug, Error)]
pub enum KeyCheckError {
    /// The service rejected the key. Carries the key reference, never the key.
    #[error("invalid {service} API key ({key}): server returned {status}")]
    InvalidKey {
        service: Service,
        key: KeyRef,
        status: StatusCode,
    },
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Convenient alias for results that use [`KeyCheckError`].
pub type Result<T> = std::result::Result<T, KeyCheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exactly_200_is_valid() {
        assert!(KeyVerdict::from_status(StatusCode::OK).is_valid());
        for status in [201u16, 204, 302, 401, 402, 403, 429, 500] {
            let status = StatusCode::from_u16(status).unwrap();
            assert_eq!(
                KeyVerdict::from_status(status),
                KeyVerdict::Invalid { status }
            );
        }
    }

    #[test]
    fn invalid_key_error_names_the_service_and_key_tail() {
        let err = KeyCheckError::InvalidKey {
            service: Service::ChatCompletions,
            key: KeyRef::from_secret("sk-verylongsecret1234"),
            status: StatusCode::UNAUTHORIZED,
        };
        let msg = err.to_string();
        assert!(msg.contains("chat-completions"));
        assert!(msg.contains("1234"));
        assert!(!msg.contains("sk-verylongsecret1234"));
        assert!(msg.contains("401"));
    }

    #[test]
    fn service_labels_are_stable() {
        assert_eq!(Service::ChatCompletions.to_string(), "chat-completions");
        assert_eq!(Service::SearchUsage.to_string(), "search-usage");
    }
}
