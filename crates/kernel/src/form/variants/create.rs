//! Record creation form.

use rand::Rng;
use tracing::debug;

use crate::error::FormError;
use crate::form::ajax::FieldMap;
use crate::form::fields::{self, QueryParams};
use crate::form::handler::FormVariant;
use crate::form::types::{DescriptorError, FormDescriptor, FormElement};
use crate::models::{Person, Repositories};

use super::{
    NATIONALITY_FIELD, RECORD_LIST_TARGET, TARGET_OBJECT, all_options_links, editable_inputs,
    owned_text, record_response, resolve_relations, selection_links, submit_url, with_links,
};

const FORM_ID: &str = "record-create";
const SUCCESS_MESSAGE: &str = "Record created successfully.";

/// Create a person (POST).
pub struct RecordCreate {
    descriptor: FormDescriptor,
    repos: Repositories,
}

impl RecordCreate {
    pub fn new(app_url: &str, repos: Repositories) -> Result<Self, DescriptorError> {
        let descriptor = FormDescriptor::builder(
            FORM_ID,
            "Create record",
            TARGET_OBJECT,
            submit_url(app_url, FORM_ID),
        )
        .method("POST")
        .on_success("created.record", RECORD_LIST_TARGET)
        .build()?;

        Ok(Self { descriptor, repos })
    }

    /// Pick a positive id no existing person uses.
    fn next_unique_id(&self) -> i64 {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = rng.gen_range(1..=i64::from(i32::MAX));
            if !self.repos.persons.exists_by_id(candidate) {
                return candidate;
            }
        }
    }
}

impl FormVariant for RecordCreate {
    fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    fn inputs(&self) -> Vec<FormElement> {
        editable_inputs()
    }

    fn default_data(&self, _params: &QueryParams) -> Result<FieldMap, FormError> {
        Ok(with_links(FieldMap::new(), all_options_links(&self.repos)))
    }

    fn submit(&self, payload: &FieldMap) -> Result<FieldMap, FormError> {
        fields::require_fields(payload, &["name", "surname", NATIONALITY_FIELD])?;
        let relations = resolve_relations(&self.repos, payload, Vec::new())?;

        // The demo repositories are read-only; the new record is only echoed.
        let person = Person::new(
            self.next_unique_id(),
            owned_text(payload, "name"),
            owned_text(payload, "surname"),
            relations.nationality,
            relations.hobbies,
        );
        debug!(unique_id = person.unique_id, "record created");

        Ok(record_response(&person, selection_links(&person), SUCCESS_MESSAGE))
    }
}
