//! Exponentiation tool definition.

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

/// Parameters for the power tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PowerParams {
    /// Base number
    pub base: f64,

    /// Exponent
    pub exponent: f64,
}

/// Power tool - raises `base` to `exponent`.
pub struct PowerTool;

impl PowerTool {
    pub const NAME: &'static str = "power";

    pub const DESCRIPTION: &'static str = "Raise a number to a power. Returns base^exponent.";

    #[instrument(skip(evaluator))]
    pub fn execute(params: &PowerParams, evaluator: &Evaluator) -> CallToolResult {
        info!("Power tool called: {} ^ {}", params.base, params.exponent);
        operation_result(evaluator.power(params.base, params.exponent))
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        evaluator: Arc<Evaluator>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: PowerParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &evaluator);
        Ok(serde_json::to_value(&result)?)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<PowerParams>().into(),
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
                let params: PowerParams = serde_json::from_value(serde_json::Value::Object(args))
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

    fn run(base: f64, exponent: f64) -> CallToolResult {
        let evaluator = Evaluator::new(&CalculatorConfig::default());
        PowerTool::execute(&PowerParams { base, exponent }, &evaluator)
    }

    #[test]
    fn test_power() {
        let result = run(2.0, 10.0);
        assert_eq!(result.structured_content.unwrap()["result"], 1024.0);

        let result = run(2.0, 0.5);
        assert_eq!(result.structured_content.unwrap()["result"], 1.4142135624);
    }

    #[test]
    fn test_power_errors() {
        let result = run(-8.0, 0.5);
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.structured_content.unwrap()["error"]["kind"], "DomainError");

        let result = run(0.0, -1.0);
        assert_eq!(
            result.structured_content.unwrap()["error"]["kind"],
            "DivisionByZeroError"
        );

        let result = run(10.0, 400.0);
        assert_eq!(result.structured_content.unwrap()["error"]["kind"], "NumericError");
    }
}
