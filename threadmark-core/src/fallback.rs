use serde_json::Value;

/// Outcome of attempting to read a tool-result payload as structured data.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback<'a> {
    /// The payload parsed as a JSON object or array.
    Structured(Value),
    /// Not structured data; the original text, untouched.
    Plain(&'a str),
}

/// Try to interpret `text` as structured data.
///
/// Only JSON objects and arrays count as structure. Scalars (`5`, `true`,
/// `"quoted"`) and invalid JSON fall back to the original string so that
/// plain payloads pass through byte-for-byte instead of being re-encoded.
pub fn parse_structured(text: &str) -> Fallback<'_> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Fallback::Structured(value),
        _ => Fallback::Plain(text),
    }
}
