//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server. The calculator domain holds the evaluator; tools, resources and
//! prompts expose it over the protocol.

pub mod calculator;
pub mod prompts;
pub mod resources;
pub mod tools;
