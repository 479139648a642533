//! Response extraction
//!
//! Two ways of reading a generation result: the raw first-choice text, and
//! `ParaphrasedQuery` tool calls for structured mode.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ExpandError;
use crate::endpoint::ToolSpec;

/// A single paraphrase of the user's question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParaphrasedQuery {
    /// A unique paraphrasing of the given question.
    pub paraphrased_query: String,
}

/// Pull the generated text out of `choices[0]`.
///
/// Completion-shaped `text` wins; chat-shaped `message.content` is accepted
/// when `text` is absent. The string is returned untouched.
pub fn extract_generated_text(response: &Value) -> Result<String, ExpandError> {
    let choice = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .ok_or_else(|| malformed("response has no choices[0]", response))?;

    choice
        .get("text")
        .and_then(Value::as_str)
        .or_else(|| {
            choice
                .get("message")
                .and_then(|m| m.get("content"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
        .ok_or_else(|| malformed("choices[0] has no text", response))
}

fn malformed(what: &str, response: &Value) -> ExpandError {
    ExpandError::MalformedResponse(format!("{}: {}", what, response))
}

/// Parses `ParaphrasedQuery` tool calls out of a chat response
#[derive(Debug, Clone)]
pub struct ParaphraseParser {
    tool: ToolSpec,
}

impl Default for ParaphraseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ParaphraseParser {
    pub const TOOL_NAME: &'static str = "ParaphrasedQuery";

    pub fn new() -> Self {
        let parameters = serde_json::to_value(schemars::schema_for!(ParaphrasedQuery))
            .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));
        Self {
            tool: ToolSpec {
                name: Self::TOOL_NAME.to_string(),
                description: "A unique paraphrasing of the given question.".to_string(),
                parameters,
            },
        }
    }

    /// Tool definition advertised to the model
    pub fn tool_spec(&self) -> &ToolSpec {
        &self.tool
    }

    /// Collect every `ParaphrasedQuery` call in `choices[0].message.tool_calls`.
    ///
    /// Arguments may arrive as a JSON string or as an inline object. Calls to
    /// other tools are skipped; no matching call at all is an error.
    pub fn parse(&self, response: &Value) -> Result<Vec<ParaphrasedQuery>, ExpandError> {
        let calls = response
            .pointer("/choices/0/message/tool_calls")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("response has no tool calls", response))?;

        let mut queries = Vec::new();
        for call in calls {
            let Some(function) = call.get("function") else {
                continue;
            };
            if function.get("name").and_then(Value::as_str) != Some(Self::TOOL_NAME) {
                continue;
            }

            let query: ParaphrasedQuery = match function.get("arguments") {
                Some(Value::String(raw)) => serde_json::from_str(raw),
                Some(inline) => serde_json::from_value(inline.clone()),
                None => return Err(malformed("tool call without arguments", call)),
            }
            .map_err(|e| ExpandError::MalformedResponse(format!("bad tool arguments: {}", e)))?;

            queries.push(query);
        }

        if queries.is_empty() {
            return Err(malformed("no ParaphrasedQuery tool calls", response));
        }
        Ok(queries)
    }
}
