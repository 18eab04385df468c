//! Square root tool definition.

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

/// Parameters for the sqrt tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SqrtParams {
    /// Number to calculate the square root of
    pub n: f64,
}

/// Sqrt tool - square root of a non-negative number.
pub struct SqrtTool;

impl SqrtTool {
    pub const NAME: &'static str = "sqrt";

    pub const DESCRIPTION: &'static str = "Calculate the square root of a number. Returns an error message for negative numbers.";

    #[instrument(skip(evaluator))]
    pub fn execute(params: &SqrtParams, evaluator: &Evaluator) -> CallToolResult {
        info!("Sqrt tool called: {}", params.n);
        operation_result(evaluator.sqrt(params.n))
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        evaluator: Arc<Evaluator>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: SqrtParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &evaluator);
        Ok(serde_json::to_value(&result)?)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SqrtParams>().into(),
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
                let params: SqrtParams = serde_json::from_value(serde_json::Value::Object(args))
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
    fn test_sqrt() {
        let evaluator = Evaluator::new(&CalculatorConfig::default());
        let result = SqrtTool::execute(&SqrtParams { n: 4.0 }, &evaluator);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["result"], 2.0);
    }

    #[test]
    fn test_sqrt_negative() {
        let evaluator = Evaluator::new(&CalculatorConfig::default());
        let result = SqrtTool::execute(&SqrtParams { n: -1.0 }, &evaluator);
        assert_eq!(result.is_error, Some(true));

        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "Error: Cannot calculate square root of negative number");
        assert_eq!(result.structured_content.unwrap()["error"]["kind"], "DomainError");
    }
}
