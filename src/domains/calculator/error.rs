//! Calculator-specific error types.

use serde::Serialize;
use thiserror::Error;

/// Result type for evaluator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors that can occur while parsing, validating or reducing an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The expression text is malformed.
    #[error("invalid syntax: {0}")]
    Syntax(String),

    /// The expression is well-formed but uses a construct outside the arithmetic allow-list.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Division (or a negative power) with a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// The operation is undefined for the given operands.
    #[error("{0}")]
    Domain(String),

    /// The result cannot be represented as a finite number.
    #[error("{0}")]
    Numeric(String),
}

/// Stable category of a [`CalcError`], reported to clients next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    SyntaxError,
    UnsupportedOperationError,
    DivisionByZeroError,
    DomainError,
    NumericError,
}

impl ErrorKind {
    /// The kind's name as it appears in structured tool output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SyntaxError => "SyntaxError",
            Self::UnsupportedOperationError => "UnsupportedOperationError",
            Self::DivisionByZeroError => "DivisionByZeroError",
            Self::DomainError => "DomainError",
            Self::NumericError => "NumericError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CalcError {
    /// Create a new syntax error.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    /// Create a new "unsupported operation" error naming the rejected construct.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedOperation(kind.into())
    }

    /// Create a new domain error.
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Create a new numeric error.
    pub fn numeric(msg: impl Into<String>) -> Self {
        Self::Numeric(msg.into())
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::SyntaxError,
            Self::UnsupportedOperation(_) => ErrorKind::UnsupportedOperationError,
            Self::DivisionByZero => ErrorKind::DivisionByZeroError,
            Self::Domain(_) => ErrorKind::DomainError,
            Self::Numeric(_) => ErrorKind::NumericError,
        }
    }
}
