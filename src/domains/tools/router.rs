//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::calculator::Evaluator;

use super::definitions::{
    AddTool, CalculateTool, DivideTool, MultiplyTool, PowerTool, SqrtTool, SubtractTool,
};

/// Build the tool router with all registered tools.
///
/// Every route shares the same read-only evaluator.
pub fn build_tool_router<S>(evaluator: Arc<Evaluator>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(AddTool::create_route(evaluator.clone()))
        .with_route(SubtractTool::create_route(evaluator.clone()))
        .with_route(MultiplyTool::create_route(evaluator.clone()))
        .with_route(DivideTool::create_route(evaluator.clone()))
        .with_route(PowerTool::create_route(evaluator.clone()))
        .with_route(SqrtTool::create_route(evaluator.clone()))
        .with_route(CalculateTool::create_route(evaluator))
}
