//! query-expander: LLM-backed query expansion
//!
//! This library sends a question to a hosted text-generation endpoint with a
//! fixed paraphrasing prompt and returns the variations the model produced,
//! for use as retrieval query expansion.
//!
//! # Modules
//!
//! - `config`: Endpoint/generation settings and config file lookup
//! - `endpoint`: Text-generation seam and the hosted endpoint client
//! - `expander`: Prompt, response extraction and the `QueryExpander`
//! - `cli`: Interactive question loop

pub mod cli;
pub mod config;
pub mod endpoint;
pub mod expander;

// Re-export commonly used types
pub use config::{ExpanderConfig, ExpansionMode};
pub use endpoint::{EndpointError, HuggingFaceEndpoint, TextGeneration};
pub use expander::{ExpandError, ParaphrasedQuery, QueryExpander};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
