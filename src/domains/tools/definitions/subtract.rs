//! Subtraction tool definition.

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

/// Parameters for the subtract tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubtractParams {
    /// Number to subtract from
    pub a: f64,

    /// Number to subtract
    pub b: f64,
}

/// Subtract tool - computes `a - b`.
pub struct SubtractTool;

impl SubtractTool {
    pub const NAME: &'static str = "subtract";

    pub const DESCRIPTION: &'static str =
        "Subtract one number from another. Returns the difference (a - b).";

    #[instrument(skip(evaluator))]
    pub fn execute(params: &SubtractParams, evaluator: &Evaluator) -> CallToolResult {
        info!("Subtract tool called: {} - {}", params.a, params.b);
        operation_result(evaluator.subtract(params.a, params.b))
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        evaluator: Arc<Evaluator>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: SubtractParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &evaluator);
        Ok(serde_json::to_value(&result)?)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SubtractParams>().into(),
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
                let params: SubtractParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &evaluator))
            }
            .boxed()
        })
    }
}
