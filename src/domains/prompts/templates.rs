//! Prompt templates.
//!
//! A template is a fixed text, optionally replaced by a variant chosen from
//! the value of one argument. `{{name}}` placeholders are filled from the
//! arguments; single braces such as `{a}` are plain text.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

/// Picks one of a template's variants from an argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelector {
    /// Name of the argument whose value selects the variant.
    pub argument: String,

    /// Value assumed when the argument is absent.
    pub default: String,
}

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<PromptArgument>,

    /// Text used without a selector, and for selector values with no variant.
    pub template: String,

    pub selector: Option<VariantSelector>,

    /// Alternative texts keyed by selector value.
    pub variants: HashMap<String, String>,
}

impl PromptTemplate {
    /// Create a template without variants.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
            selector: None,
            variants: HashMap::new(),
        }
    }

    /// The text for these arguments, before placeholder substitution.
    ///
    /// The selector argument (or its default when absent) names a variant;
    /// an unknown value falls back to `template`.
    pub fn select(&self, arguments: &HashMap<String, String>) -> &str {
        let Some(selector) = &self.selector else {
            return &self.template;
        };

        let value = arguments
            .get(&selector.argument)
            .unwrap_or(&selector.default);
        self.variants
            .get(value)
            .map(String::as_str)
            .unwrap_or(&self.template)
    }

    /// Select the text and fill its `{{name}}` placeholders.
    ///
    /// A placeholder without a matching argument renders as nothing.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut rest = self.select(arguments);
        let mut rendered = String::with_capacity(rest.len());

        while let Some(open) = rest.find("{{") {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let close = after.find("}}").ok_or_else(|| {
                PromptError::template(format!("unclosed placeholder in '{}'", self.name))
            })?;

            let key = after[..close].trim();
            if let Some(value) = arguments.get(key) {
                rendered.push_str(value);
            }
            rest = &after[close + 2..];
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}

/// Builder for prompt templates.
pub struct PromptTemplateBuilder {
    template: PromptTemplate,
}

impl PromptTemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            template: PromptTemplate::new(name, None, Vec::new(), String::new()),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.template.description = Some(description.into());
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = PromptArgument>) -> Self {
        self.template.arguments.extend(arguments);
        self
    }

    /// Set the fallback text.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template.template = template.into();
        self
    }

    /// Select variants by the value of `argument`, assuming `default` when it is absent.
    pub fn selector(mut self, argument: impl Into<String>, default: impl Into<String>) -> Self {
        self.template.selector = Some(VariantSelector {
            argument: argument.into(),
            default: default.into(),
        });
        self
    }

    /// Add a variant used when the selector argument equals `value`.
    pub fn variant(mut self, value: impl Into<String>, template: impl Into<String>) -> Self {
        self.template.variants.insert(value.into(), template.into());
        self
    }

    pub fn build(self) -> PromptTemplate {
        self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_placeholder_substitution() {
        let template = PromptTemplate::new("test", None, vec![], "Result: {{ value }}.");
        assert_eq!(template.render(&args(&[("value", "42")])).unwrap(), "Result: 42.");
        assert_eq!(template.render(&HashMap::new()).unwrap(), "Result: .");
    }

    #[test]
    fn test_single_braces_are_literal() {
        let template = PromptTemplate::new("test", None, vec![], "Please add {a} and {b}");
        let result = template.render(&args(&[("a", "1")])).unwrap();
        assert_eq!(result, "Please add {a} and {b}");
    }

    #[test]
    fn test_unclosed_placeholder() {
        let template = PromptTemplate::new("test", None, vec![], "{{value");
        assert!(matches!(
            template.render(&HashMap::new()),
            Err(PromptError::TemplateError(_))
        ));
    }

    #[test]
    fn test_variant_selection() {
        let template = PromptTemplateBuilder::new("pick")
            .template("fallback")
            .selector("mode", "one")
            .variant("one", "first")
            .variant("two", "second {{mode}}")
            .build();

        assert_eq!(template.render(&HashMap::new()).unwrap(), "first");
        assert_eq!(template.render(&args(&[("mode", "two")])).unwrap(), "second two");
        assert_eq!(template.render(&args(&[("mode", "three")])).unwrap(), "fallback");
    }

    #[test]
    fn test_builder() {
        let template = PromptTemplateBuilder::new("sum")
            .description("Sum two numbers")
            .arguments(vec![PromptArgument {
                name: "a".to_string(),
                title: None,
                description: None,
                required: Some(true),
            }])
            .template("Add {{a}}")
            .build();

        assert_eq!(template.name, "sum");
        assert_eq!(template.description.as_deref(), Some("Sum two numbers"));
        assert_eq!(template.arguments.len(), 1);
        assert!(template.selector.is_none());
    }
}
