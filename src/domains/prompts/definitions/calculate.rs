//! Calculation prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Asks for a calculation in words, phrased per operation.
///
/// `{a}` and `{b}` are left for the client to fill in.
pub struct CalculatePrompt;

impl PromptDefinition for CalculatePrompt {
    const NAME: &'static str = "calculate_prompt";
    const DESCRIPTION: &'static str = "Generate a prompt for performing calculations";

    fn template() -> &'static str {
        "Please perform a calculation"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![PromptArgument {
            name: "operation".to_string(),
            title: None,
            description: Some(
                "Type of operation: add, subtract, multiply or divide (default: add)".to_string(),
            ),
            required: Some(false),
        }]
    }

    fn selector() -> Option<(&'static str, &'static str)> {
        Some(("operation", "add"))
    }

    fn variants() -> Vec<(&'static str, &'static str)> {
        vec![
            ("add", "Please add {a} and {b}"),
            ("subtract", "Please subtract {b} from {a}"),
            ("multiply", "Please multiply {a} by {b}"),
            ("divide", "Please divide {a} by {b}"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_prompt_metadata() {
        assert_eq!(CalculatePrompt::NAME, "calculate_prompt");
        assert!(!CalculatePrompt::DESCRIPTION.is_empty());

        let args = CalculatePrompt::arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "operation");
        assert_eq!(args[0].required, Some(false));
    }

    #[test]
    fn test_default_operation_has_variant() {
        let (_, default) = CalculatePrompt::selector().unwrap();
        assert!(
            CalculatePrompt::variants()
                .iter()
                .any(|(value, _)| *value == default)
        );
    }
}
