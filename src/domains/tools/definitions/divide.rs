//! Division tool definition.
//!
//! A zero denominator is answered with the text `Error: Division by zero`
//! and a `DivisionByZeroError` structured error; it is never a protocol error.

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

/// Parameters for the divide tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DivideParams {
    /// Numerator
    pub a: f64,

    /// Denominator
    pub b: f64,
}

/// Divide tool - computes `a / b`.
pub struct DivideTool;

impl DivideTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "divide";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Divide one number by another. Returns the quotient (a / b), or an error message if the denominator is zero.";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip(evaluator))]
    pub fn execute(params: &DivideParams, evaluator: &Evaluator) -> CallToolResult {
        info!("Divide tool called: {} / {}", params.a, params.b);
        operation_result(evaluator.divide(params.a, params.b))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        evaluator: Arc<Evaluator>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: DivideParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &evaluator);
        Ok(serde_json::to_value(&result)?)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DivideParams>().into(),
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
                let params: DivideParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &evaluator))
            }
            .boxed()
        })
    }
}
