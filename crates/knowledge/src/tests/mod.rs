//! Cross-module tests for the knowledge crate.

mod chunk_properties;
mod session_flow;
pub(crate) mod support;
