//! HTTP request handlers.

pub(crate) mod health;
pub(crate) mod mcp;
pub(crate) mod split;

use serde_json::Value;

use crate::error::ServerError;

/// Extract the `text` argument of a split request.
///
/// Anything other than an object with a string `text` field is rejected, so
/// a number or `null` never reaches the splitter.
pub(crate) fn text_argument(args: &Value) -> Result<&str, ServerError> {
    match args.get("text") {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ServerError::InvalidInput(format!(
            "`text` must be a string, got {}",
            json_type_name(other)
        ))),
        None => Err(ServerError::InvalidInput(
            "missing required argument `text`".to_owned(),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
