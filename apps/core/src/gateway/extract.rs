//! Message-text extraction from the completion service's success payload.
//!
//! The success shape varies per deployment: `choices[0].message.content` may
//! be a plain string, an array of typed parts, or absent with the text
//! recoverable from tool calls, a parsed object, a refusal, or top-level
//! `output_text` fields. The fallback order is documented as data: a
//! prioritized list of extractor functions, first non-empty result wins.

use crate::error::AppError;
use serde_json::Value;

/// Ordered extractors over the raw response. Evaluated front to back.
const EXTRACTORS: &[fn(&Value) -> Option<String>] = &[
    extract_string_content,
    extract_content_parts,
    extract_tool_call_arguments,
    extract_parsed_object,
    extract_refusal,
    extract_output_text,
];

/// Extract the completion text from a raw response body.
///
/// Returns the first non-empty candidate in the documented fallback order,
/// or an error carrying a bounded shape diagnostic (never full content).
pub fn extract_message_text(response: &Value) -> Result<String, AppError> {
    for extractor in EXTRACTORS {
        if let Some(text) = extractor(response) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
    }

    Err(AppError::EmptyCompletion(shape_diagnostic(response)))
}

fn message(response: &Value) -> &Value {
    &response["choices"][0]["message"]
}

/// `choices[0].message.content` as a direct string.
fn extract_string_content(response: &Value) -> Option<String> {
    message(response)["content"].as_str().map(str::to_string)
}

/// `choices[0].message.content` as an array of typed parts, joined.
fn extract_content_parts(response: &Value) -> Option<String> {
    let parts = message(response)["content"].as_array()?;
    let joined: String = parts.iter().filter_map(part_text).collect();
    Some(joined)
}

/// Extractable text of a single content part.
fn part_text(part: &Value) -> Option<String> {
    if let Some(s) = part.as_str() {
        return Some(s.to_string());
    }
    for key in ["text", "data", "output_text", "content", "arguments"] {
        if let Some(s) = part[key].as_str() {
            return Some(s.to_string());
        }
    }
    for key in ["json", "parsed"] {
        let value = &part[key];
        if !value.is_null() {
            return serde_json::to_string(value).ok();
        }
    }
    None
}

/// First tool call's argument string.
fn extract_tool_call_arguments(response: &Value) -> Option<String> {
    message(response)["tool_calls"][0]["function"]["arguments"]
        .as_str()
        .map(str::to_string)
}

/// Structured-output `parsed` object, re-serialized.
fn extract_parsed_object(response: &Value) -> Option<String> {
    let parsed = &message(response)["parsed"];
    if parsed.is_null() {
        return None;
    }
    serde_json::to_string(parsed).ok()
}

/// Refusal reason text.
fn extract_refusal(response: &Value) -> Option<String> {
    message(response)["refusal"].as_str().map(str::to_string)
}

/// Top-level `output_text`: array of strings joined by newline, or a string.
fn extract_output_text(response: &Value) -> Option<String> {
    match &response["output_text"] {
        Value::Array(items) => {
            let lines: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Compact description of the response shape for the empty-completion error.
/// Ids, counts and presence flags only; content never leaks into the error.
fn shape_diagnostic(response: &Value) -> String {
    let id = response["id"].as_str().unwrap_or("none");
    let model = response["model"].as_str().unwrap_or("none");
    let choices = response["choices"].as_array().map(Vec::len).unwrap_or(0);
    let finish_reason = response["choices"][0]["finish_reason"]
        .as_str()
        .unwrap_or("none");
    let msg = message(response);
    format!(
        "no message text (id={}, model={}, choices={}, finish_reason={}, has_message={}, has_content={}, has_tool_calls={}, has_refusal={})",
        id,
        model,
        choices,
        finish_reason,
        !msg.is_null(),
        !msg["content"].is_null(),
        !msg["tool_calls"].is_null(),
        !msg["refusal"].is_null(),
    )
}
