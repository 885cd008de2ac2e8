//! Request handling for AJAX forms.
//!
//! [`FormHandler::manage`] is the single entry point: it validates the
//! content type, the method and (for submissions) the form id and CSRF
//! token, then calls back into the [`FormVariant`]. Every path yields exactly
//! one [`Envelope`]; the caller turns it into the one response.

use axum::body::Bytes;
use axum::http::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::FormError;

use super::ajax::{Envelope, FieldMap};
use super::csrf::FormSession;
use super::fields::QueryParams;
use super::types::{FormDescriptor, FormElement};

/// The only content type accepted by form endpoints.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Hidden field carrying the form identifier.
pub const FORM_ID_FIELD: &str = "formId";

/// Hidden field carrying the CSRF token.
pub const CSRF_TOKEN_FIELD: &str = "csrfToken";

pub const CONTENT_TYPE_NOT_SUPPORTED: &str = "Content type not supported";
pub const METHOD_NOT_SUPPORTED: &str = "Method not supported";
pub const INVALID_FORM_PARAMS: &str = "Param \"formId\" and/or \"csrfToken\" are not valid.";
const BODY_NOT_OBJECT: &str = "Request body must be a JSON object.";

/// Hooks a concrete form supplies to the generic handler.
pub trait FormVariant: Send + Sync {
    /// Immutable configuration of this form.
    fn descriptor(&self) -> &FormDescriptor;

    /// Inputs rendered as placeholders for the initial data.
    fn inputs(&self) -> Vec<FormElement>;

    /// Load the data that pre-populates the form. Must not mutate state.
    fn default_data(&self, params: &QueryParams) -> Result<FieldMap, FormError>;

    /// Validate and process a submission that already passed the form id and
    /// CSRF checks.
    ///
    /// Read-only forms never reach this hook.
    fn submit(&self, _payload: &FieldMap) -> Result<FieldMap, FormError> {
        Err(FormError::bad_request(METHOD_NOT_SUPPORTED))
    }
}

/// An inbound form request, decoupled from the HTTP framework.
#[derive(Debug, Clone)]
pub struct FormRequest {
    method: Method,
    content_type: Option<String>,
    query: QueryParams,
    body: Bytes,
}

impl FormRequest {
    /// Create a request with no query and an empty body.
    pub fn new(method: Method, content_type: Option<String>) -> Self {
        Self {
            method,
            content_type,
            query: QueryParams::new(),
            body: Bytes::new(),
        }
    }

    /// Create a request declaring the JSON content type.
    pub fn json(method: Method) -> Self {
        Self::new(method, Some(JSON_CONTENT_TYPE.to_string()))
    }

    /// Set the query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Add one query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Set the raw body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the body to a serialized JSON value.
    pub fn with_json(self, body: &Value) -> Self {
        self.with_body(body.to_string())
    }

    /// Request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

/// Generic handler driving one form variant.
pub struct FormHandler<'a> {
    variant: &'a dyn FormVariant,
}

impl<'a> FormHandler<'a> {
    /// Create a handler for a variant.
    pub fn new(variant: &'a dyn FormVariant) -> Self {
        Self { variant }
    }

    /// Handle one request and return the envelope to send.
    pub fn manage(&self, request: &FormRequest, session: &FormSession) -> Envelope {
        let form_id = self.variant.descriptor().form_id();
        let envelope = Envelope::from(self.dispatch(request, session));

        match &envelope {
            Envelope::Ok(_) => info!(
                form_id = %form_id,
                method = %request.method,
                "form request accepted"
            ),
            Envelope::Error { code, messages } => debug!(
                form_id = %form_id,
                method = %request.method,
                status = code.as_u16(),
                messages = ?messages,
                "form request rejected"
            ),
        }

        envelope
    }

    fn dispatch(&self, request: &FormRequest, session: &FormSession) -> Result<FieldMap, FormError> {
        if request.content_type() != Some(JSON_CONTENT_TYPE) {
            return Err(FormError::bad_request(CONTENT_TYPE_NOT_SUPPORTED));
        }

        let descriptor = self.variant.descriptor();

        if request.method == Method::GET {
            return self.initial_data(&request.query, session);
        }

        if descriptor.is_read_only() || !descriptor.method().matches(&request.method) {
            return Err(FormError::bad_request(METHOD_NOT_SUPPORTED));
        }

        self.process_submit(&request.body, session)
    }

    /// Serve the variant's default data with the hidden form fields.
    fn initial_data(&self, params: &QueryParams, session: &FormSession) -> Result<FieldMap, FormError> {
        let form_id = self.variant.descriptor().form_id();
        let mut data = self.variant.default_data(params)?;

        let token = session.issue(form_id);
        data.insert(FORM_ID_FIELD.to_string(), Value::from(form_id));
        data.insert(CSRF_TOKEN_FIELD.to_string(), Value::from(token));

        Ok(data)
    }

    /// Check the hidden fields, consume the token, then run the submit hook.
    fn process_submit(&self, body: &Bytes, session: &FormSession) -> Result<FieldMap, FormError> {
        let form_id = self.variant.descriptor().form_id();

        let payload = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(payload)) => payload,
            _ => return Err(FormError::bad_request(BODY_NOT_OBJECT)),
        };

        let presented_id = payload.get(FORM_ID_FIELD).and_then(Value::as_str);
        let presented_token = payload
            .get(CSRF_TOKEN_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default();

        // The token is only consumed when the form id matches.
        if presented_id != Some(form_id) || !session.consume(form_id, presented_token) {
            return Err(FormError::bad_request(INVALID_FORM_PARAMS));
        }

        self.variant.submit(&payload)
    }
}
