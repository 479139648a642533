//! Query expander module
//!
//! This module turns a question into paraphrased variations using an LLM.

mod parser;
mod prompt;
mod query_expander;

pub use parser::{extract_generated_text, ParaphraseParser, ParaphrasedQuery};
pub use prompt::{PromptTemplate, SYSTEM_PROMPT};
pub use query_expander::{ExpandError, QueryExpander};
