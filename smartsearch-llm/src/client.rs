//! OpenAI-compatible chat-completion client.
//!
//! Works against any endpoint that accepts the standard
//! `{"model": ..., "messages": [...]}` request and answers with a `choices`
//! array; the configured endpoint is taken as the full completions URL.

use serde::{Deserialize, Serialize};
use smartsearch_common::CompletionConfig;
use smartsearch_http::{Auth, HttpClient, RequestOpts};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Http(#[from] smartsearch_http::HttpError),
    /// The service answered 200 but the response carried no choices.
    #[error("completion response carried no choices")]
    MissingContent,
}

/// Message role in a conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in the conversation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client bound to one completion endpoint and model.
#[derive(Clone, Debug)]
pub struct CompletionClient {
    http: HttpClient,
    config: CompletionConfig,
}

impl CompletionClient {
    /// Create a client for the given configuration.
    ///
    /// Fails fast on an empty credential or an endpoint that does not parse
    /// as a URL, so misconfiguration surfaces at startup instead of on the
    /// first request.
    pub fn new(config: CompletionConfig) -> crate::Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("completion API key is empty".into()));
        }
        let http = HttpClient::new(&config.endpoint)?;
        Ok(Self { http, config })
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send the messages and return the first choice's content.
    pub async fn complete(&self, messages: &[ChatMessage]) -> crate::Result<String> {
        let req = ChatRequest {
            model: &self.config.model,
            messages,
        };
        let opts = RequestOpts {
            auth: Some(Auth::Bearer(&self.config.api_key)),
            ..Default::default()
        };

        let resp: ChatResponse = self.http.post_json(&req, opts).await?;
        let content = resp
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::MissingContent)?;

        tracing::debug!(
            model=%self.config.model,
            key=%self.config.key_ref(),
            content_len=content.len(),
            "llm.complete.done"
        );
        Ok(content)
    }
}
