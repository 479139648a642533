//! Query expander implementation
//!
//! Uses an LLM endpoint to rephrase a question for retrieval query expansion.

use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

use super::parser::{extract_generated_text, ParaphraseParser};
use super::prompt::{PromptTemplate, SYSTEM_PROMPT};
use crate::config::{ExpanderConfig, ExpansionMode};
use crate::endpoint::{EndpointError, GenerationRequest, HuggingFaceEndpoint, TextGeneration};

/// Why an expansion produced nothing
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),
}

/// Query expander using an LLM
pub struct QueryExpander {
    /// System instructions sent with every question
    system_prompt: String,
    /// Conversation template
    prompt: PromptTemplate,
    /// Text-generation backend
    endpoint: Arc<dyn TextGeneration>,
    /// Tool-call parser for structured mode
    parser: ParaphraseParser,
    mode: ExpansionMode,
}

impl QueryExpander {
    /// Create an expander over any text-generation backend
    pub fn new(endpoint: Arc<dyn TextGeneration>) -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            prompt: PromptTemplate::expansion(SYSTEM_PROMPT),
            endpoint,
            parser: ParaphraseParser::new(),
            mode: ExpansionMode::Raw,
        }
    }

    /// Create an expander backed by the hosted endpoint described by `config`
    pub fn from_config(config: &ExpanderConfig) -> Self {
        Self::new(Arc::new(HuggingFaceEndpoint::from_config(config))).with_mode(config.mode())
    }

    /// Set extraction mode
    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Expand a question into variations.
    ///
    /// Never fails: any error is reported on stdout and yields an empty list.
    pub async fn expand_query(&self, question: &str) -> Vec<String> {
        self.expand_query_to(question, &mut std::io::stdout()).await
    }

    /// Same as [`expand_query`](Self::expand_query), reporting errors to `out`
    pub async fn expand_query_to<W: Write>(&self, question: &str, out: &mut W) -> Vec<String> {
        match self.try_expand(question).await {
            Ok(variations) => variations,
            Err(e) => {
                tracing::warn!("Query expansion failed: {}", e);
                let _ = writeln!(out, "Error expanding query: {}", e);
                Vec::new()
            }
        }
    }

    /// Expand a question, surfacing the failure cause
    pub async fn try_expand(&self, question: &str) -> Result<Vec<String>, ExpandError> {
        let mut request = GenerationRequest::new(self.prompt.format(question));
        if self.mode == ExpansionMode::Structured {
            request = request.with_tool(self.parser.tool_spec().clone());
        }

        let response = self.endpoint.generate(&request).await?;

        match self.mode {
            ExpansionMode::Raw => Ok(vec![extract_generated_text(&response)?]),
            ExpansionMode::Structured => Ok(self
                .parser
                .parse(&response)?
                .into_iter()
                .map(|q| q.paraphrased_query)
                .collect()),
        }
    }

    /// Get the system prompt
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Get the mode
    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Replays a fixed body and remembers the last request
    struct FixedEndpoint {
        body: Value,
        seen: Mutex<Option<GenerationRequest>>,
    }

    #[async_trait]
    impl TextGeneration for FixedEndpoint {
        async fn generate(&self, request: &GenerationRequest) -> Result<Value, EndpointError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            Ok(self.body.clone())
        }
    }

    fn fixed(body: Value) -> Arc<FixedEndpoint> {
        Arc::new(FixedEndpoint {
            body,
            seen: Mutex::new(None),
        })
    }

    #[test]
    fn test_query_expander_creation() {
        let expander = QueryExpander::new(fixed(json!({})));
        assert_eq!(expander.system_prompt(), SYSTEM_PROMPT);
        assert_eq!(expander.mode(), ExpansionMode::Raw);
    }

    #[tokio::test]
    async fn test_raw_mode_sends_two_messages_without_tools() {
        let endpoint = fixed(json!({"choices": [{"text": "x"}]}));
        let expander = QueryExpander::new(endpoint.clone());

        expander.try_expand("What is RRF?").await.unwrap();

        let seen = endpoint.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.messages.len(), 2);
        assert_eq!(seen.messages[1].content, "What is RRF?");
        assert!(seen.tools.is_empty());
    }

    #[tokio::test]
    async fn test_structured_mode_returns_every_paraphrase() {
        let endpoint = fixed(json!({"choices": [{"message": {"tool_calls": [
            {"function": {"name": "ParaphrasedQuery", "arguments": "{\"paraphrased_query\": \"A\"}"}},
            {"function": {"name": "ParaphrasedQuery", "arguments": "{\"paraphrased_query\": \"B\"}"}}
        ]}}]}));
        let expander = QueryExpander::new(endpoint.clone()).with_mode(ExpansionMode::Structured);

        let variations = expander.try_expand("Q").await.unwrap();

        assert_eq!(variations, vec!["A".to_string(), "B".to_string()]);
        let seen = endpoint.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.tools.len(), 1);
        assert_eq!(seen.tools[0].name, "ParaphrasedQuery");
    }

    #[tokio::test]
    async fn test_malformed_response_reported_to_writer() {
        let expander = QueryExpander::new(fixed(json!({"unexpected": true})));
        let mut out = Vec::new();

        let variations = expander.expand_query_to("Q", &mut out).await;

        assert!(variations.is_empty());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Error expanding query: Unexpected response shape"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unwritable_error_stream_still_returns_empty() {
        let expander = QueryExpander::new(fixed(json!(null)));

        let variations = expander.expand_query_to("Q", &mut ClosedPipe).await;

        assert!(variations.is_empty());
    }
}
