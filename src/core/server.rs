//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic, backed by the shared [`Evaluator`])
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    calculator::{CalcError, CalcResult, Evaluator},
    prompts::PromptService,
    resources::ResourceService,
    tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

/// Instructions advertised to clients on initialization.
pub const INSTRUCTIONS: &str = "Calculator MCP server. Tools: add, subtract, multiply, divide, power, sqrt and calculate (safe evaluation of arithmetic expressions with + - * / ^ and parentheses). Resource calculator://constants lists common mathematical constants. Prompt calculate_prompt phrases a calculation request.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between different domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared evaluator behind every tool.
    evaluator: Arc<Evaluator>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let evaluator = Arc::new(Evaluator::new(&config.calculator));

        Self {
            tool_router: build_tool_router::<Self>(evaluator.clone()),
            config,
            evaluator,
            resource_service: Arc::new(ResourceService::new()),
            prompt_service: Arc::new(PromptService::new()),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the shared evaluator.
    pub fn evaluator(&self) -> &Arc<Evaluator> {
        &self.evaluator
    }

    /// Sanity check used by the readiness check: `2 + 2` must evaluate to `4`.
    pub fn readiness_check(&self) -> CalcResult<()> {
        let value = self.evaluator.evaluate("2 + 2")?;
        if value == 4.0 {
            Ok(())
        } else {
            Err(CalcError::numeric(format!("2 + 2 evaluated to {}", value)))
        }
    }

    /// Every tool the router serves.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name outside an rmcp session.
    ///
    /// Dispatches through the [`ToolRegistry`], which reaches the same
    /// `execute` functions as the router.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        ToolRegistry::new(self.evaluator.clone()).call_tool(name, arguments)
    }

    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resource_service.list_resources().await
    }

    pub async fn read_resource(&self, uri: &str) -> crate::Result<ReadResourceResult> {
        Ok(self.resource_service.read_resource(uri).await?)
    }

    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompt_service.list_prompts().await
    }

    /// Render a prompt. Non-string argument values are ignored.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> crate::Result<GetPromptResult> {
        let arguments = arguments.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        });
        Ok(self.prompt_service.get_prompt(name, arguments).await?)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: McpServer::list_resources(self).await,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        McpServer::read_resource(self, &request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        Ok(ListPromptsResult {
            prompts: McpServer::list_prompts(self).await,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        McpServer::get_prompt(self, &request.name, request.arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(message: &PromptMessage) -> &str {
        match &message.content {
            PromptMessageContent::Text { text } => text,
            _ => panic!("Expected text message"),
        }
    }

    #[test]
    fn test_server_identity() {
        let server = McpServer::new(Config::default());
        assert_eq!(server.name(), "calculator");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));

        let info = server.get_info();
        assert_eq!(info.server_info.name, "calculator");
        assert!(info.instructions.unwrap().contains("calculate"));
    }

    #[test]
    fn test_readiness_check() {
        let server = McpServer::new(Config::default());
        assert!(server.readiness_check().is_ok());
    }

    #[test]
    fn test_list_tools() {
        let server = McpServer::new(Config::default());
        let tools = server.list_tools();
        assert_eq!(tools.len(), 7);
        assert!(tools.iter().all(|t| t.description.is_some()));
    }

    #[tokio::test]
    async fn test_read_resource() {
        let server = McpServer::new(Config::default());
        let result = server.read_resource("calculator://constants").await.unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["contents"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Mathematical Constants:"));

        let missing = server.read_resource("calculator://missing").await;
        assert!(matches!(missing, Err(crate::Error::Resource(_))));
    }

    #[tokio::test]
    async fn test_get_prompt() {
        let server = McpServer::new(Config::default());
        let arguments = serde_json::json!({ "operation": "divide", "ignored": 1 });
        let result = server
            .get_prompt("calculate_prompt", arguments.as_object().cloned())
            .await
            .unwrap();
        assert_eq!(text_of(&result.messages[0]), "Please divide {a} by {b}");

        let missing = server.get_prompt("nope", None).await;
        assert!(matches!(missing, Err(crate::Error::Prompt(_))));
    }
}
