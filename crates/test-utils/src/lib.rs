//! AjaxForm test utilities.
//!
//! Helpers for integration testing: submission payload builders and
//! assertion utilities for JSON envelopes.

use serde_json::{Map, Value};

/// Start a submission payload carrying the hidden form fields.
pub fn submission(form_id: &str, csrf_token: &str) -> Submission {
    Submission::new()
        .field("formId", form_id)
        .field("csrfToken", csrf_token)
}

/// A form submission payload builder.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    fields: Map<String, Value>,
}

impl Submission {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Remove a field.
    pub fn without(mut self, name: &str) -> Self {
        self.fields.remove(name);
        self
    }

    /// Build the payload as a JSON value.
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }

    /// Build the payload as a request body.
    pub fn to_body(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

/// Demo record fixtures.
pub mod fixtures {
    /// Pedro, Spain, Sports and Music.
    pub const PEDRO_ID: i64 = 23;
    /// Sandra, France, Literature and Reading.
    pub const SANDRA_ID: i64 = 98;
    /// An id no demo record uses.
    pub const UNKNOWN_ID: i64 = 4242;
    /// Number of demo nationalities.
    pub const NATIONALITY_COUNT: usize = 6;
    /// Number of demo hobbies.
    pub const HOBBY_COUNT: usize = 10;
}

/// Assertion helpers for JSON envelopes.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert an `ok` envelope.
    pub fn envelope_ok(value: &Value) {
        assert_eq!(
            value.get("status").and_then(Value::as_str),
            Some("ok"),
            "Expected ok envelope, got: {value}"
        );
    }

    /// Assert an `error` envelope with the given code.
    pub fn envelope_error(value: &Value, code: u16) {
        assert_eq!(
            value.get("status").and_then(Value::as_str),
            Some("error"),
            "Expected error envelope, got: {value}"
        );
        assert_eq!(
            value.get("error").and_then(Value::as_u64),
            Some(u64::from(code)),
            "Expected error code {code}, got: {value}"
        );
    }

    /// Assert an `error` envelope with the given code and exact messages.
    pub fn envelope_error_messages(value: &Value, code: u16, expected: &[&str]) {
        envelope_error(value, code);
        assert_eq!(
            messages(value),
            expected,
            "Unexpected messages in: {value}"
        );
    }

    /// Messages of an envelope (empty when absent).
    pub fn messages(value: &Value) -> Vec<&str> {
        value
            .get("messages")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// CSRF token of an initial-data envelope.
    pub fn csrf_token(value: &Value) -> String {
        match value.get("csrfToken").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => panic!("Expected a CSRF token in: {value}"),
        }
    }

    /// Relation link named `rel` in an envelope.
    pub fn link<'a>(value: &'a Value, rel: &str) -> &'a Value {
        value
            .get("links")
            .and_then(Value::as_array)
            .and_then(|links| links.iter().find(|link| link["rel"] == rel))
            .unwrap_or_else(|| panic!("Expected link '{rel}' in: {value}"))
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }
}
