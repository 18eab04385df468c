//! Prompt Registry - central registration of all prompts.
//!
//! This module provides dynamic prompt registration without modifying service.rs.
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_prompts()`

use super::definitions::{CalculatePrompt, PromptDefinition};
use super::templates::{PromptTemplate, PromptTemplateBuilder};

/// Build a PromptTemplate from a PromptDefinition.
fn build_template<P: PromptDefinition>() -> PromptTemplate {
    let mut builder = PromptTemplateBuilder::new(P::NAME)
        .description(P::DESCRIPTION)
        .arguments(P::arguments())
        .template(P::template());

    if let Some((argument, default)) = P::selector() {
        builder = builder.selector(argument, default);
    }
    for (value, template) in P::variants() {
        builder = builder.variant(value, template);
    }

    builder.build()
}

/// Get all registered prompts as PromptTemplates.
pub fn get_all_prompts() -> Vec<PromptTemplate> {
    vec![build_template::<CalculatePrompt>()]
}
