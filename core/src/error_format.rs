//! Human-readable messages for failed gateway exchanges.
//!
//! Error payloads arrive in several partial shapes: a `responseCode` and
//! `responseMessage` pair, a framework-style `message` with an `errors` map
//! of field name to messages, or a mix. They are merged into one line:
//!
//! ```text
//! [<responseCode>] <primary message> | <field error> | <field error>
//! ```
//!
//! Field errors are appended first and the code prefix is applied last, so
//! the code always wraps the whole message.

use serde_json::{Map, Value};

const SEPARATOR: &str = " | ";

/// Compose the error message for a non-2xx response.
///
/// Returns `fallback` unchanged when `raw_body` is absent or is not a JSON
/// object. `http_status` only feeds the trace log.
pub fn format_error_message(http_status: u16, raw_body: Option<&str>, fallback: &str) -> String {
    let payload = match raw_body.and_then(|body| serde_json::from_str::<Value>(body).ok()) {
        Some(Value::Object(map)) => map,
        _ => {
            tracing::trace!(http_status, "error body is not a JSON object, using fallback");
            return fallback.to_string();
        }
    };

    let message = main_message(&payload, fallback);
    let message = append_field_errors(message, &payload);
    prepend_response_code(message, &payload)
}

fn non_empty_str<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn main_message(payload: &Map<String, Value>, fallback: &str) -> String {
    non_empty_str(payload, "responseMessage")
        .or_else(|| non_empty_str(payload, "message"))
        .unwrap_or(fallback)
        .to_string()
}

fn append_field_errors(message: String, payload: &Map<String, Value>) -> String {
    let groups: Vec<&Value> = match payload.get("errors") {
        Some(Value::Object(fields)) => fields.values().collect(),
        Some(Value::Array(items)) => items.iter().collect(),
        _ => return message,
    };

    let lines: Vec<&str> = groups
        .into_iter()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(Value::as_str)
        .collect();

    if lines.is_empty() {
        return message;
    }
    format!("{message}{SEPARATOR}{}", lines.join(SEPARATOR))
}

fn prepend_response_code(message: String, payload: &Map<String, Value>) -> String {
    match non_empty_str(payload, "responseCode") {
        Some(code) => format!("[{code}] {message}"),
        None => message,
    }
}
