//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains, providing consistent error handling across the application.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// Error originating from the evaluator.
    #[error("Calculation error: {0}")]
    Calc(#[from] crate::domains::calculator::CalcError),

    /// Error originating from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::calculator::CalcError;
    use crate::domains::resources::ResourceError;

    #[test]
    fn test_domain_errors_convert() {
        let err: Error = CalcError::DivisionByZero.into();
        assert_eq!(err.to_string(), "Calculation error: division by zero");

        let err: Error = ResourceError::not_found("calculator://x").into();
        assert!(matches!(err, Error::Resource(_)));
    }
}
