//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod add;
pub mod calculate;
pub mod common;
pub mod divide;
pub mod multiply;
pub mod power;
pub mod sqrt;
pub mod subtract;

pub use add::{AddParams, AddTool};
pub use calculate::{CalculateParams, CalculateTool};
pub use divide::{DivideParams, DivideTool};
pub use multiply::{MultiplyParams, MultiplyTool};
pub use power::{PowerParams, PowerTool};
pub use sqrt::{SqrtParams, SqrtTool};
pub use subtract::{SubtractParams, SubtractTool};
