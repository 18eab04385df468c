//! Result builders shared by the calculator tools.
//!
//! Every tool answers with a text content (the number, or an error string
//! starting with `Error:`) plus structured content: `{"result": n}` on
//! success and `{"error": {"kind", "message"}}` on failure.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

use crate::domains::calculator::{CalcError, CalcResult, ErrorKind};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

#[derive(Debug, Serialize)]
struct NumericOutput {
    result: f64,
}

#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    kind: ErrorKind,
    message: String,
}

/// Render a number the way clients expect to read it (`14.0`, `0.5`, `1e+20`).
///
/// Shortest round-trip digits. Magnitudes below `1e-4` or from `1e16` up use
/// an exponent with an explicit sign and at least two digits (`1e-05`).
pub fn format_number(value: f64) -> String {
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Successful result carrying `value`.
pub fn number_result(value: f64) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(format_number(value))],
        structured_content: serde_json::to_value(NumericOutput { result: value }).ok(),
        is_error: Some(false),
        meta: None,
    }
}

/// Error result with a caller-chosen text and the structured error detail.
pub fn error_result(text: String, error: &CalcError) -> CallToolResult {
    warn!("{}", text);
    let detail = ErrorOutput {
        error: ErrorDetail {
            kind: error.kind(),
            message: error.to_string(),
        },
    };
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: serde_json::to_value(detail).ok(),
        is_error: Some(true),
        meta: None,
    }
}

/// Text reported by the single-operation tools for a failed computation.
pub fn operation_error_text(error: &CalcError) -> String {
    match error {
        CalcError::DivisionByZero => "Error: Division by zero".to_string(),
        other => format!("Error: {}", capitalize(&other.to_string())),
    }
}

/// Turn the outcome of a single operation into a tool result.
pub fn operation_result(outcome: CalcResult<f64>) -> CallToolResult {
    match outcome {
        Ok(value) => number_result(value),
        Err(e) => error_result(operation_error_text(&e), &e),
    }
}

/// Deserialize HTTP tool arguments into a tool's parameter struct.
#[cfg(feature = "http")]
pub fn parse_arguments<P>(arguments: serde_json::Value) -> Result<P, ToolError>
where
    P: serde::de::DeserializeOwned,
{
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(14.0), "14.0");
        assert_eq!(format_number(0.3), "0.3");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_format_number_exponents() {
        assert_eq!(format_number(1e20), "1e+20");
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(-1.5e300), "-1.5e+300");
        assert_eq!(format_number(1e-5), "1e-05");
        assert_eq!(format_number(2.5e-7), "2.5e-07");
        assert_eq!(format_number(1e-100), "1e-100");
    }

    #[test]
    fn test_number_result() {
        let result = number_result(2.5);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["result"], 2.5);
    }

    #[test]
    fn test_operation_error_text() {
        assert_eq!(
            operation_error_text(&CalcError::DivisionByZero),
            "Error: Division by zero"
        );
        assert_eq!(
            operation_error_text(&CalcError::numeric("result is not a number")),
            "Error: Result is not a number"
        );
    }

    #[test]
    fn test_error_result_structure() {
        let result = operation_result(Err(CalcError::DivisionByZero));
        assert_eq!(result.is_error, Some(true));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["error"]["kind"], "DivisionByZeroError");
        assert_eq!(structured["error"]["message"], "division by zero");
    }
}
