//! Form descriptor and input element types.

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while building a [`FormDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("unsupported form method: {0}")]
    UnsupportedMethod(String),

    #[error("form '{0}' uses GET as its submit method but is not read-only")]
    GetSubmit(String),

    #[error("form id must not be empty")]
    EmptyFormId,
}

/// HTTP methods a form can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubmitMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl SubmitMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitMethod::Get => "GET",
            SubmitMethod::Post => "POST",
            SubmitMethod::Patch => "PATCH",
            SubmitMethod::Delete => "DELETE",
        }
    }

    /// Check whether an inbound request method is this one.
    pub fn matches(&self, method: &Method) -> bool {
        method.as_str() == self.as_str()
    }
}

impl fmt::Display for SubmitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmitMethod {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(SubmitMethod::Get),
            "POST" => Ok(SubmitMethod::Post),
            "PATCH" => Ok(SubmitMethod::Patch),
            "DELETE" => Ok(SubmitMethod::Delete),
            other => Err(DescriptorError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Client-side event fired after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessEvent {
    /// Event name (e.g., "updated.record").
    pub event: String,

    /// CSS selector of the element the event is triggered on.
    pub target: String,
}

/// Immutable form configuration, fixed when a variant is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDescriptor {
    form_id: String,
    name: String,
    target: String,
    submit_url: String,
    method: SubmitMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_success: Option<SuccessEvent>,
    read_only: bool,
}

impl FormDescriptor {
    /// Start building a descriptor.
    pub fn builder(
        form_id: impl Into<String>,
        name: impl Into<String>,
        target: impl Into<String>,
        submit_url: impl Into<String>,
    ) -> FormDescriptorBuilder {
        FormDescriptorBuilder {
            form_id: form_id.into(),
            name: name.into(),
            target: target.into(),
            submit_url: submit_url.into(),
            method: "POST".to_string(),
            on_success: None,
            read_only: false,
        }
    }

    /// Unique form identifier (e.g., "record-update").
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Display name (e.g., "Update record").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the entity the form operates on.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// URL the client loads and submits the form through.
    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }

    /// Expected submit method.
    pub fn method(&self) -> SubmitMethod {
        self.method
    }

    /// Event fired on success, if any.
    pub fn on_success(&self) -> Option<&SuccessEvent> {
        self.on_success.as_ref()
    }

    /// Whether the form only serves initial data.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

/// Builder for [`FormDescriptor`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct FormDescriptorBuilder {
    form_id: String,
    name: String,
    target: String,
    submit_url: String,
    method: String,
    on_success: Option<SuccessEvent>,
    read_only: bool,
}

impl FormDescriptorBuilder {
    /// Set the expected submit method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the success event.
    pub fn on_success(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.on_success = Some(SuccessEvent {
            event: event.into(),
            target: target.into(),
        });
        self
    }

    /// Mark the form as read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Validate and build the descriptor.
    pub fn build(self) -> Result<FormDescriptor, DescriptorError> {
        if self.form_id.is_empty() {
            return Err(DescriptorError::EmptyFormId);
        }

        let method: SubmitMethod = self.method.parse()?;
        if method == SubmitMethod::Get && !self.read_only {
            return Err(DescriptorError::GetSubmit(self.form_id));
        }

        Ok(FormDescriptor {
            form_id: self.form_id,
            name: self.name,
            target: self.target,
            submit_url: self.submit_url,
            method,
            on_success: self.on_success,
            read_only: self.read_only,
        })
    }
}

/// An input declared by a form, rendered as a placeholder the client fills
/// from the initial-data response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormElement {
    /// Input name; matches the key in initial data and submissions.
    pub name: String,

    /// Element type with type-specific configuration.
    #[serde(flatten)]
    pub element_type: ElementType,

    /// Element title/label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Element description/help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Whether this field is required.
    pub required: bool,

    /// Whether this element is disabled.
    pub disabled: bool,
}

impl FormElement {
    /// Create a textfield element.
    pub fn textfield(name: impl Into<String>) -> Self {
        Self::new(name, ElementType::Textfield)
    }

    /// Create a select element whose options come from a relation link.
    pub fn select(name: impl Into<String>) -> Self {
        Self::new(name, ElementType::Select { multiple: false })
    }

    /// Create a multi-select element whose options come from a relation link.
    pub fn multi_select(name: impl Into<String>) -> Self {
        Self::new(name, ElementType::Select { multiple: true })
    }

    /// Create a checkbox element.
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, ElementType::Checkbox)
    }

    /// Create a hidden field.
    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name, ElementType::Hidden)
    }

    fn new(name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            element_type,
            title: None,
            description: None,
            placeholder: None,
            required: false,
            disabled: false,
        }
    }

    /// Set the element title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the element description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Element type variants with type-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementType {
    /// Single-line text input.
    Textfield,

    /// Select populated from a relation link.
    Select { multiple: bool },

    /// Single checkbox.
    Checkbox,

    /// Hidden field.
    Hidden,
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let descriptor = FormDescriptor::builder(
            "record-update",
            "Update record",
            "Record",
            "/form-manager/record-update",
        )
        .method("PATCH")
        .on_success("updated.record", "#record-list-table")
        .build()
        .unwrap();

        assert_eq!(descriptor.form_id(), "record-update");
        assert_eq!(descriptor.method(), SubmitMethod::Patch);
        assert!(!descriptor.is_read_only());
        assert_eq!(descriptor.on_success().unwrap().event, "updated.record");
    }

    #[test]
    fn test_descriptor_rejects_unsupported_method() {
        let result = FormDescriptor::builder("f", "F", "Record", "/f")
            .method("PUT")
            .build();
        assert_eq!(
            result,
            Err(DescriptorError::UnsupportedMethod("PUT".to_string()))
        );
    }

    #[test]
    fn test_descriptor_rejects_lowercase_method() {
        let result = FormDescriptor::builder("f", "F", "Record", "/f")
            .method("post")
            .build();
        assert!(matches!(result, Err(DescriptorError::UnsupportedMethod(_))));
    }

    #[test]
    fn test_descriptor_get_requires_read_only() {
        let result = FormDescriptor::builder("f", "F", "Record", "/f")
            .method("GET")
            .build();
        assert_eq!(result, Err(DescriptorError::GetSubmit("f".to_string())));

        let descriptor = FormDescriptor::builder("f", "F", "Record", "/f")
            .method("GET")
            .read_only()
            .build()
            .unwrap();
        assert!(descriptor.is_read_only());
    }

    #[test]
    fn test_descriptor_rejects_empty_id() {
        let result = FormDescriptor::builder("", "F", "Record", "/f").build();
        assert_eq!(result, Err(DescriptorError::EmptyFormId));
    }

    #[test]
    fn test_submit_method_matches() {
        assert!(SubmitMethod::Patch.matches(&Method::PATCH));
        assert!(!SubmitMethod::Patch.matches(&Method::POST));
        assert!(!SubmitMethod::Delete.matches(&Method::PUT));
    }

    #[test]
    fn test_form_element_types() {
        let textfield = FormElement::textfield("name");
        assert_eq!(textfield.element_type, ElementType::Textfield);

        let hobbies = FormElement::multi_select("hobbies");
        assert!(matches!(
            hobbies.element_type,
            ElementType::Select { multiple: true }
        ));
    }

    #[test]
    fn test_element_serialization() {
        let element = FormElement::textfield("name")
            .title("Name")
            .placeholder("Name")
            .disabled();

        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "textfield");
        assert_eq!(json["name"], "name");
        assert_eq!(json["disabled"], true);
        assert!(json.get("description").is_none());
    }
}
