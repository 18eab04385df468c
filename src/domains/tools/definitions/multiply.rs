//! Multiplication tool definition.

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

use super::common::operation_result;
#[cfg(feature = "http")]
use super::common::parse_arguments;
use crate::domains::calculator::Evaluator;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the multiply tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MultiplyParams {
    /// First number
    pub a: f64,

    /// Second number
    pub b: f64,
}

/// Multiply tool - computes the product of two numbers.
pub struct MultiplyTool;

impl MultiplyTool {
    pub const NAME: &'static str = "multiply";

    pub const DESCRIPTION: &'static str = "Multiply two numbers. Returns the product of a and b.";

    #[instrument(skip(evaluator))]
    pub fn execute(params: &MultiplyParams, evaluator: &Evaluator) -> CallToolResult {
        info!("Multiply tool called: {} * {}", params.a, params.b);
        operation_result(evaluator.multiply(params.a, params.b))
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        evaluator: Arc<Evaluator>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: MultiplyParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &evaluator);
        Ok(serde_json::to_value(&result)?)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<MultiplyParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(evaluator: Arc<Evaluator>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let evaluator = evaluator.clone();
            async move {
                let params: MultiplyParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &evaluator))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CalculatorConfig;

    #[test]
    fn test_multiply() {
        let evaluator = Evaluator::new(&CalculatorConfig::default());
        let params = MultiplyParams { a: 1.1, b: 3.0 };
        let result = MultiplyTool::execute(&params, &evaluator);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["result"], 3.3);
    }

    #[test]
    fn test_multiply_respects_precision() {
        let evaluator = Evaluator::new(&CalculatorConfig { max_precision: 1 });
        let params = MultiplyParams { a: 0.25, b: 1.0 };
        let result = MultiplyTool::execute(&params, &evaluator);
        // 0.25 is an exact tie, so it goes to the even digit.
        assert_eq!(result.structured_content.unwrap()["result"], 0.2);
    }
}
