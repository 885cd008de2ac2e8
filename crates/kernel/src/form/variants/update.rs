//! Record update form.

use tracing::debug;

use crate::error::FormError;
use crate::form::ajax::FieldMap;
use crate::form::fields::{self, QueryParams};
use crate::form::handler::FormVariant;
use crate::form::types::{DescriptorError, FormDescriptor, FormElement};
use crate::models::{Person, Repositories};

use super::{
    NATIONALITY_FIELD, RECORD_LIST_TARGET, TARGET_OBJECT, UNIQUE_ID_FIELD, all_options_links,
    editable_inputs, owned_text, person_from_query, record_response, resolve_relations,
    selection_links, submit_url, with_links,
};

const FORM_ID: &str = "record-update";
const SUCCESS_MESSAGE: &str = "Record updated successfully.";

/// Edit an existing person (PATCH).
pub struct RecordUpdate {
    descriptor: FormDescriptor,
    repos: Repositories,
}

impl RecordUpdate {
    pub fn new(app_url: &str, repos: Repositories) -> Result<Self, DescriptorError> {
        let descriptor = FormDescriptor::builder(
            FORM_ID,
            "Update record",
            TARGET_OBJECT,
            submit_url(app_url, FORM_ID),
        )
        .method("PATCH")
        .on_success("updated.record", RECORD_LIST_TARGET)
        .build()?;

        Ok(Self { descriptor, repos })
    }
}

impl FormVariant for RecordUpdate {
    fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    fn inputs(&self) -> Vec<FormElement> {
        editable_inputs()
    }

    fn default_data(&self, params: &QueryParams) -> Result<FieldMap, FormError> {
        let person = person_from_query(&self.repos, params)?;
        Ok(with_links(person.form_fields(), all_options_links(&self.repos)))
    }

    fn submit(&self, payload: &FieldMap) -> Result<FieldMap, FormError> {
        fields::require_fields(payload, &[UNIQUE_ID_FIELD, "name", "surname", NATIONALITY_FIELD])?;

        let unique_id = payload
            .get(UNIQUE_ID_FIELD)
            .and_then(fields::parse_id)
            .filter(|id| self.repos.persons.exists_by_id(*id));
        let mut not_found = Vec::new();
        if unique_id.is_none() {
            not_found.push("Record not found.".to_string());
        }

        let relations = resolve_relations(&self.repos, payload, not_found)?;
        let Some(unique_id) = unique_id else {
            return Err(FormError::not_found("Record not found."));
        };

        // The demo repositories are read-only; the update is only echoed.
        let person = Person::new(
            unique_id,
            owned_text(payload, "name"),
            owned_text(payload, "surname"),
            relations.nationality,
            relations.hobbies,
        );
        debug!(unique_id, "record updated");

        Ok(record_response(&person, selection_links(&person), SUCCESS_MESSAGE))
    }
}
