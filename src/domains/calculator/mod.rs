//! Calculator domain module.
//!
//! Sandboxed evaluation of arithmetic. An expression goes through four
//! stages, each in its own file:
//!
//! - `lexer.rs` / `parser.rs` - text to a general [`syntax::Syntax`] tree
//! - `validate.rs` - allow-list conversion to an arithmetic [`ast::Node`]
//! - `reduce.rs` - bottom-up reduction to a single `f64`
//! - `rounding.rs` - round-half-even to the configured precision
//!
//! [`Evaluator`] ties the stages together and also exposes the
//! single-operation functions used by the arithmetic tools.

pub mod ast;
mod error;
mod evaluator;
pub mod lexer;
pub mod parser;
pub mod reduce;
pub mod rounding;
pub mod syntax;
pub mod validate;

pub use error::{CalcError, CalcResult, ErrorKind};
pub use evaluator::Evaluator;
