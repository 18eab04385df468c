//! Prompt service implementation.
//!
//! The PromptService manages prompt templates and their instantiation.
//! Prompts are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::{info, warn};

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for managing and instantiating prompts.
pub struct PromptService {
    /// Registry of available prompts.
    /// Key: prompt name, Value: prompt template
    prompts: HashMap<String, PromptTemplate>,
}

impl PromptService {
    /// Create a new PromptService with every registered prompt.
    pub fn new() -> Self {
        info!("Initializing PromptService");

        let mut service = Self {
            prompts: HashMap::new(),
        };
        for template in get_all_prompts() {
            service.register_prompt(template);
        }
        service
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) {
        info!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self.prompts.get(name).ok_or_else(|| {
            warn!("Unknown prompt requested: {}", name);
            PromptError::not_found(name)
        })?;

        let arguments = arguments.unwrap_or_default();

        // Validate required arguments
        for arg in &template.arguments {
            if arg.required.unwrap_or(false) && !arguments.contains_key(&arg.name) {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::PromptMessageContent;

    async fn render(operation: Option<&str>) -> String {
        let service = PromptService::new();
        let args = operation.map(|op| HashMap::from([("operation".to_string(), op.to_string())]));
        let result = service.get_prompt("calculate_prompt", args).await.unwrap();
        assert_eq!(result.messages.len(), 1);
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text.clone(),
            _ => panic!("Expected text message"),
        }
    }

    #[tokio::test]
    async fn test_prompt_service_creation() {
        let service = PromptService::new();
        let prompts = service.list_prompts().await;
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].name, "calculate_prompt");
    }

    #[tokio::test]
    async fn test_calculate_prompt_operations() {
        assert_eq!(render(None).await, "Please add {a} and {b}");
        assert_eq!(render(Some("add")).await, "Please add {a} and {b}");
        assert_eq!(render(Some("subtract")).await, "Please subtract {b} from {a}");
        assert_eq!(render(Some("multiply")).await, "Please multiply {a} by {b}");
        assert_eq!(render(Some("divide")).await, "Please divide {a} by {b}");
    }

    #[tokio::test]
    async fn test_calculate_prompt_unknown_operation() {
        assert_eq!(render(Some("modulo")).await, "Please perform a calculation");
        assert_eq!(render(Some("")).await, "Please perform a calculation");
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let service = PromptService::new();
        let result = service.get_prompt("nonexistent", None).await;
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let mut service = PromptService::new();
        service.register_prompt(PromptTemplate::new(
            "needs_value",
            None,
            vec![rmcp::model::PromptArgument {
                name: "value".to_string(),
                title: None,
                description: None,
                required: Some(true),
            }],
            "{{value}}",
        ));

        let result = service.get_prompt("needs_value", None).await;
        assert!(matches!(result, Err(PromptError::MissingArgument(_))));
    }
}
