//! Text-generation endpoint module
//!
//! `TextGeneration` is the seam between the expander and whatever serves the
//! model. `HuggingFaceEndpoint` is the hosted implementation.

mod hf_client;
mod message;

pub use hf_client::{EndpointError, HuggingFaceEndpoint};
pub use message::{ConversationMessage, Role};

use async_trait::async_trait;
use serde::Serialize;

/// A function tool advertised to the model
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One generation call: the conversation plus any tools offered to the model
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub messages: Vec<ConversationMessage>,
    pub tools: Vec<ToolSpec>,
}

impl GenerationRequest {
    pub fn new(messages: Vec<ConversationMessage>) -> Self {
        Self {
            messages,
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool: ToolSpec) -> Self {
        self.tools.push(tool);
        self
    }
}

/// Anything that can turn a conversation into a raw generation result.
///
/// Implementations return the endpoint's JSON body untouched; interpreting it
/// is the caller's job.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<serde_json::Value, EndpointError>;
}
