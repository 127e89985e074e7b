//! Parse a model answer into a whole extraction cell

use docgrid_domain::{Confidence, ExtractionCell};
use serde_json::Value;
use tracing::warn;

/// Parse the model's JSON answer into a cell
///
/// Tolerant where the model is sloppy (markdown fences, wrong value types,
/// odd confidence casing) and strict where the cell invariant demands it:
/// no usable `value` means no cell at all.
pub fn parse_answer(response: &str) -> Result<ExtractionCell, String> {
    let json_str = strip_code_fence(response);

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| format!("JSON parse error: {}", e))?;

    let obj = json
        .as_object()
        .ok_or_else(|| "expected a JSON object".to_string())?;

    let value = obj
        .get("value")
        .map(render_value)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| "missing or empty 'value'".to_string())?;

    // An unparseable confidence degrades to Low rather than dropping the cell
    let confidence = obj
        .get("confidence")
        .and_then(|v| v.as_str())
        .and_then(Confidence::parse)
        .unwrap_or_else(|| {
            warn!("answer missing a usable confidence, treating as low");
            Confidence::Low
        });

    let quote = obj
        .get("quote")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let page = obj
        .get("page")
        .and_then(|v| v.as_u64())
        .and_then(|p| u32::try_from(p).ok());

    let reasoning = obj
        .get("reasoning")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(ExtractionCell::new(value, confidence, quote, page, reasoning))
}

/// Render whatever the model put in `value` as the stored string
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        Value::Object(_) => value.to_string(),
    }
}

/// Strip a markdown code fence, if the model wrapped its answer in one
fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();
    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        lines[1..lines.len().saturating_sub(1)].join("\n")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_answer() {
        let response = r#"{
            "value": "2024-03-01",
            "confidence": "high",
            "quote": "effective March 1st, 2024",
            "page": 4,
            "reasoning": "The effective date is stated explicitly."
        }"#;

        let cell = parse_answer(response).unwrap();
        assert_eq!(cell.value, "2024-03-01");
        assert_eq!(cell.confidence, Confidence::High);
        assert_eq!(cell.page, Some(4));
        assert!(cell.review.is_none());
    }

    #[test]
    fn test_parse_fenced_answer() {
        let response = "```json\n{\"value\": \"yes\", \"confidence\": \"medium\"}\n```";
        let cell = parse_answer(response).unwrap();
        assert_eq!(cell.value, "yes");
        assert_eq!(cell.confidence, Confidence::Medium);
        assert_eq!(cell.quote, "");
    }

    #[test]
    fn test_numeric_and_boolean_values_are_stringified() {
        let cell = parse_answer(r#"{"value": 950, "confidence": "high"}"#).unwrap();
        assert_eq!(cell.value, "950");

        let cell = parse_answer(r#"{"value": true, "confidence": "high"}"#).unwrap();
        assert_eq!(cell.value, "true");
    }

    #[test]
    fn test_list_value_is_joined() {
        let cell =
            parse_answer(r#"{"value": ["alpha", "beta"], "confidence": "low"}"#).unwrap();
        assert_eq!(cell.value, "alpha, beta");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(parse_answer(r#"{"confidence": "high"}"#).is_err());
        assert!(parse_answer(r#"{"value": null, "confidence": "high"}"#).is_err());
    }

    #[test]
    fn test_bad_confidence_degrades_to_low() {
        let cell = parse_answer(r#"{"value": "x", "confidence": "certain"}"#).unwrap();
        assert_eq!(cell.confidence, Confidence::Low);
    }

    #[test]
    fn test_not_json_is_an_error() {
        assert!(parse_answer("the rent is $950").is_err());
    }

    #[test]
    fn test_array_response_is_an_error() {
        assert!(parse_answer(r#"[{"value": "x"}]"#).is_err());
    }
}
