//! Payload field helpers shared by form variants.
//!
//! Payload values arrive as JSON; browsers serialize form inputs as strings,
//! so identifiers are accepted either as integers or decimal strings.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::FormError;

use super::ajax::FieldMap;

/// Query parameters of an initial-data request.
pub type QueryParams = HashMap<String, String>;

/// Check whether a required payload value counts as missing.
///
/// Required fields are scalars: absent values, `null`, empty or
/// whitespace-only strings, arrays and objects are blank. Numbers and
/// booleans never are.
pub fn is_blank(value: Option<&Value>) -> bool {
    value
        .and_then(field_text)
        .is_none_or(|text| text.trim().is_empty())
}

/// Require every field in `names`, reporting all missing ones together.
pub fn require_fields(payload: &FieldMap, names: &[&str]) -> Result<(), FormError> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| is_blank(payload.get(**name)))
        .map(|name| format!("Field \"{name}\" is required."))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::BadRequest(missing))
    }
}

/// Textual form of a scalar value (strings as-is, numbers and booleans
/// formatted). Arrays, objects and `null` have none.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text of a named payload field, or an empty string.
pub fn text(payload: &FieldMap, name: &str) -> String {
    payload.get(name).and_then(field_text).unwrap_or_default()
}

/// Parse an identifier from an integer or a decimal string.
pub fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Values of a field that may hold one value or an array of values.
pub fn value_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(single) => vec![single],
    }
}

/// Read a required identifier from initial-data query parameters.
///
/// A missing parameter is a bad request; one that does not parse cannot name
/// an existing entity and is reported as not found.
pub fn query_id(params: &QueryParams, name: &str) -> Result<i64, FormError> {
    let Some(raw) = params.get(name) else {
        return Err(FormError::bad_request(format!("Missing param \"{name}\".")));
    };

    raw.trim()
        .parse()
        .map_err(|_| FormError::not_found(format!("Invalid param \"{name}\".")))
}
