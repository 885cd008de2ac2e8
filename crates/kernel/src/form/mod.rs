//! AJAX form protocol with single-use CSRF tokens.
//!
//! A form is a [`FormVariant`] driven by the generic [`FormHandler`]:
//! - GET requests return the variant's default data plus a fresh CSRF token
//! - submissions (POST/PATCH/DELETE) must carry the form id and that token
//! - every request ends in exactly one JSON [`Envelope`]
//!
//! The concrete record forms live in [`variants`].

pub mod ajax;
pub mod csrf;
pub mod fields;
mod handler;
mod registry;
mod types;
pub mod variants;

pub use ajax::{Envelope, FieldMap, RelationLink, SelectItem, SelectType};
pub use csrf::{CsrfStore, FormSession, IssuedToken, MemoryCsrfStore, generate_csrf_token};
pub use handler::{
    CONTENT_TYPE_NOT_SUPPORTED, CSRF_TOKEN_FIELD, FORM_ID_FIELD, FormHandler, FormRequest,
    FormVariant, INVALID_FORM_PARAMS, JSON_CONTENT_TYPE, METHOD_NOT_SUPPORTED,
};
pub use registry::FormRegistry;
pub use types::{
    DescriptorError, ElementType, FormDescriptor, FormDescriptorBuilder, FormElement,
    SubmitMethod, SuccessEvent,
};
