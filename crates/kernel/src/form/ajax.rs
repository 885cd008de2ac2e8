//! JSON envelope and relation links sent back to AJAX forms.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::FormError;

/// Named values carried by a form payload or an `ok` envelope.
pub type FieldMap = serde_json::Map<String, Value>;

/// The only shape ever sent to the client.
///
/// Serializes as `{"status": "ok", ...fields}` or
/// `{"status": "error", "error": <code>, "messages": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Successful exchange carrying named values.
    Ok(FieldMap),

    /// Rejected exchange with a status code and ordered messages.
    Error {
        code: StatusCode,
        messages: Vec<String>,
    },
}

impl Envelope {
    /// Create a successful envelope.
    pub fn ok(fields: FieldMap) -> Self {
        Self::Ok(fields)
    }

    /// Create an error envelope.
    pub fn error(code: StatusCode, messages: Vec<String>) -> Self {
        Self::Error { code, messages }
    }

    /// HTTP status the envelope is sent with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Ok(_) => StatusCode::OK,
            Self::Error { code, .. } => *code,
        }
    }

    /// Check whether this is an `ok` envelope.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Fields of an `ok` envelope.
    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            Self::Ok(fields) => Some(fields),
            Self::Error { .. } => None,
        }
    }

    /// Messages of an `error` envelope (empty for `ok`).
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Ok(_) => &[],
            Self::Error { messages, .. } => messages,
        }
    }
}

impl From<FormError> for Envelope {
    fn from(error: FormError) -> Self {
        let code = error.status();
        Self::Error {
            code,
            messages: error.into_messages(),
        }
    }
}

impl From<Result<FieldMap, FormError>> for Envelope {
    fn from(result: Result<FieldMap, FormError>) -> Self {
        match result {
            Ok(fields) => Self::Ok(fields),
            Err(error) => error.into(),
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ok(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry("status", "ok")?;
                // The tag is authoritative.
                for (key, value) in fields.iter().filter(|(key, _)| key.as_str() != "status") {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Error { code, messages } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("status", "error")?;
                map.serialize_entry("error", &code.as_u16())?;
                map.serialize_entry("messages", messages)?;
                map.end()
            }
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Selection arity of a relation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectType {
    /// A single-value select.
    Single,
    /// A multiple-value select.
    Multi,
}

/// One candidate of a relation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectItem {
    pub unique_id: i64,
    pub select_name: String,
    pub name: String,
}

impl SelectItem {
    /// Create a candidate whose select label is its name.
    pub fn new(unique_id: i64, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            unique_id,
            select_name: name.clone(),
            name,
        }
    }
}

/// Foreign selection list used by the client to populate a dependent select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationLink {
    /// Relation name, matching the select input's name.
    pub rel: String,

    /// Whether one or many candidates can be selected.
    pub select_type: SelectType,

    /// Ordered candidates.
    pub data: Vec<SelectItem>,
}

impl RelationLink {
    /// Create a relation link from any sequence of candidates.
    pub fn new<I, T>(rel: impl Into<String>, select_type: SelectType, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectItem>,
    {
        Self {
            rel: rel.into(),
            select_type,
            data: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a single-select link.
    pub fn single<I, T>(rel: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectItem>,
    {
        Self::new(rel, SelectType::Single, items)
    }

    /// Create a multi-select link.
    pub fn multi<I, T>(rel: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectItem>,
    {
        Self::new(rel, SelectType::Multi, items)
    }
}
