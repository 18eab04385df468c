//! Expression evaluation tool definition.
//!
//! The expression is parsed, checked against the arithmetic allow-list and
//! reduced by [`Evaluator::evaluate`]. Anything outside literals, `+ - * / ^`
//! (or `**`), unary minus and parentheses is rejected before evaluation.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{error_result, number_result};
#[cfg(feature = "http")]
use super::common::parse_arguments;
use crate::domains::calculator::Evaluator;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the calculate tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalculateParams {
    /// Mathematical expression to evaluate (e.g., "2 + 2 * 3")
    pub expression: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Calculate tool - evaluates an arithmetic expression safely.
pub struct CalculateTool;

impl CalculateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Evaluate a mathematical expression safely. Supports numbers, parentheses, unary minus and the operators + - * / and ^ (or **, right-associative). Returns the result or an error message.";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(expression = %params.expression))]
    pub fn execute(params: &CalculateParams, evaluator: &Evaluator) -> CallToolResult {
        info!("Calculate tool called");
        match evaluator.evaluate(&params.expression) {
            Ok(value) => number_result(value),
            Err(e) => error_result(format!("Error: Invalid expression - {}", e), &e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        evaluator: Arc<Evaluator>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: CalculateParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &evaluator);
        Ok(serde_json::to_value(&result)?)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<CalculateParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(evaluator: Arc<Evaluator>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let evaluator = evaluator.clone();
            async move {
                let params: CalculateParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &evaluator))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CalculatorConfig;

    fn calculate(expression: &str) -> CallToolResult {
        let evaluator = Evaluator::new(&CalculatorConfig::default());
        let params = CalculateParams {
            expression: expression.to_string(),
        };
        CalculateTool::execute(&params, &evaluator)
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    fn error_kind(result: CallToolResult) -> String {
        let structured = result.structured_content.expect("structured_content should exist");
        structured["error"]["kind"].as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn test_calculate() {
        let result = calculate("2 + 3 * 4");
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "14.0");
        assert_eq!(result.structured_content.unwrap()["result"], 14.0);
    }

    #[test]
    fn test_calculate_right_associative_power() {
        let result = calculate("2 ^ 3 ^ 2");
        assert_eq!(result.structured_content.unwrap()["result"], 512.0);
    }

    #[test]
    fn test_calculate_syntax_errors() {
        let result = calculate("2 +");
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Error: Invalid expression - invalid syntax"));
        assert_eq!(error_kind(result), "SyntaxError");

        assert_eq!(error_kind(calculate("")), "SyntaxError");
        assert_eq!(error_kind(calculate("(1 + 2")), "SyntaxError");
    }

    #[test]
    fn test_calculate_rejects_code() {
        let result = calculate("import os");
        assert_eq!(
            text_of(&result),
            "Error: Invalid expression - Unsupported operation: Import"
        );
        assert_eq!(error_kind(result), "UnsupportedOperationError");

        for expression in [
            "__import__('os')",
            "open('/etc/passwd').read()",
            "(1).__class__",
            "[1, 2][0]",
            "lambda: 1",
        ] {
            assert_eq!(
                error_kind(calculate(expression)),
                "UnsupportedOperationError",
                "{expression}"
            );
        }
    }

    #[test]
    fn test_calculate_division_by_zero() {
        let result = calculate("1 / 0");
        assert_eq!(text_of(&result), "Error: Invalid expression - division by zero");
        assert_eq!(error_kind(result), "DivisionByZeroError");
    }

    #[test]
    fn test_structured_content_serialization() {
        let result = calculate("10 / 4");
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized["structuredContent"]["result"], 2.5);
        assert_eq!(serialized["content"][0]["text"], "2.5");
    }
}
