//! Tool Registry - central registration and dispatch for all tools.
//!
//! Dispatches tool calls by name for the HTTP transport. Listing goes
//! through the router, so the two are kept in step by a test in `router.rs`.

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use crate::domains::calculator::Evaluator;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

use super::definitions::{
    AddTool, CalculateTool, DivideTool, MultiplyTool, PowerTool, SqrtTool, SubtractTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - name-based dispatch outside an rmcp session.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    evaluator: Arc<Evaluator>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(evaluator: Arc<Evaluator>) -> Self {
        Self { evaluator }
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// A failed computation is still `Ok`: the serialized `CallToolResult`
    /// carries `isError`. Only unknown tools and malformed arguments are `Err`.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let evaluator = self.evaluator.clone();
        match name {
            AddTool::NAME => AddTool::http_handler(arguments, evaluator),
            SubtractTool::NAME => SubtractTool::http_handler(arguments, evaluator),
            MultiplyTool::NAME => MultiplyTool::http_handler(arguments, evaluator),
            DivideTool::NAME => DivideTool::http_handler(arguments, evaluator),
            PowerTool::NAME => PowerTool::http_handler(arguments, evaluator),
            SqrtTool::NAME => SqrtTool::http_handler(arguments, evaluator),
            CalculateTool::NAME => CalculateTool::http_handler(arguments, evaluator),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
