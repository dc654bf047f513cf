//! Request adapter: raw text or JSON payloads to the value handed to validation

use clap::ValueEnum;
use serde_json::Value;
use thiserror::Error;

/// Field holding the sequence in a request payload
pub const NUMBERS_FIELD: &str = "numbers";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid JSON input: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// How to interpret raw input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    /// JSON if the text starts with `{`, `[` or `"`, plain text otherwise
    #[default]
    Auto,
    /// A JSON request payload (`{"numbers": [...]}`) or a bare JSON value
    Json,
    /// Whitespace- or comma-separated tokens
    Text,
}

/// Parse raw input into a value for [`crate::validate_input`]
pub fn parse_input(text: &str, format: InputFormat) -> Result<Value, InputError> {
    let format = match format {
        InputFormat::Auto => detect_format(text),
        other => other,
    };
    match format {
        InputFormat::Json => {
            let payload: Value = serde_json::from_str(text)?;
            Ok(extract_numbers(payload))
        }
        _ => Ok(parse_tokens(text)),
    }
}

/// Take the `numbers` field out of a request object; any other value is returned as-is.
///
/// An object without the field yields `null`, which validation rejects as not a sequence.
pub fn extract_numbers(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => map.remove(NUMBERS_FIELD).unwrap_or(Value::Null),
        other => other,
    }
}

fn detect_format(text: &str) -> InputFormat {
    match text.trim_start().chars().next() {
        Some('{') | Some('[') | Some('"') => InputFormat::Json,
        _ => InputFormat::Text,
    }
}

fn parse_tokens(text: &str) -> Value {
    let items = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| match serde_json::from_str::<Value>(token) {
            Ok(value) if !value.is_object() && !value.is_array() => value,
            _ => Value::String(token.to_string()),
        })
        .collect();
    Value::Array(items)
}
