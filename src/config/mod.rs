//! Configuration module for query-expander
//!
//! This module defines the endpoint/generation settings and config file lookup.

mod expander_config;
pub mod path_resolver;

pub use expander_config::{ExpanderConfig, ExpansionMode};
