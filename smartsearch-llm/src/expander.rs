//! Query expansion on top of the completion client.

use crate::client::{ChatMessage, CompletionClient};
use crate::prompts;

/// Expands a search query into follow-up detail keywords.
pub struct QueryExpander {
    client: CompletionClient,
}

impl QueryExpander {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    /// Ask the model for follow-up keywords for `query`, informed by a
    /// `summary` of what the query found so far.
    ///
    /// The reply is split on single spaces and passed through as-is: when the
    /// model honors the prompt contract, each element is one keyword, with
    /// multi-word keywords carrying `+` joints. A reply that strays from the
    /// contract (double spaces, prose) shows up verbatim in the output.
    /// Callers that want trimmed, non-empty phrases can run the result
    /// through [`normalize_phrases`].
    pub async fn expand(&self, query: &str, summary: &str) -> crate::Result<Vec<String>> {
        tracing::debug!(
            query=%query_snippet(query),
            summary_len=summary.len(),
            "llm.expand.start"
        );

        let t0 = std::time::Instant::now();
        let prompt = prompts::expansion_prompt(query, summary);
        let content = match self.client.complete(&[ChatMessage::user(prompt)]).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    query=%query_snippet(query),
                    error=%err,
                    elapsed_ms=t0.elapsed().as_millis() as u64,
                    "llm.expand.error"
                );
                return Err(err);
            }
        };

        let keywords: Vec<String> = content.split(' ').map(str::to_string).collect();
        tracing::debug!(
            query=%query_snippet(query),
            keyword_count=keywords.len(),
            elapsed_ms=t0.elapsed().as_millis() as u64,
            "llm.expand.done"
        );
        Ok(keywords)
    }
}

/// Trim phrases and drop the empties a malformed reply produces.
///
/// [`QueryExpander::expand`] never reshapes the model's reply; this is the
/// cleanup step for callers that prefer hygiene over fidelity.
pub fn normalize_phrases(phrases: &[String]) -> Vec<String> {
    phrases
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

// Char-safe head of the query for log lines.
fn query_snippet(query: &str) -> String {
    const MAX: usize = 80;
    if query.chars().count() <= MAX {
        query.to_string()
    } else {
        let mut out: String = query.chars().take(MAX).collect();
        out.push('…');
        out
    }
}
