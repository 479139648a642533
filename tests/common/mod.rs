//! Shared test doubles for the text-generation seam

#![allow(dead_code)]

use async_trait::async_trait;
use query_expander::endpoint::{GenerationRequest, TextGeneration};
use query_expander::EndpointError;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns the same JSON body for every call
pub struct StubEndpoint {
    body: Value,
    calls: AtomicUsize,
}

impl StubEndpoint {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            calls: AtomicUsize::new(0),
        }
    }

    /// Completion-shaped `{choices: [{text}]}` body
    pub fn with_text(text: &str) -> Self {
        Self::new(serde_json::json!({ "choices": [{ "text": text }] }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGeneration for StubEndpoint {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Value, EndpointError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// Fails every call with a network error
pub struct FailingEndpoint {
    message: String,
    calls: AtomicUsize,
}

impl FailingEndpoint {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGeneration for FailingEndpoint {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Value, EndpointError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EndpointError::Network(self.message.clone()))
    }
}
