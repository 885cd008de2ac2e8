//! Record deletion form with an explicit confirmation checkbox.

use serde_json::json;
use tracing::debug;

use crate::error::FormError;
use crate::form::ajax::FieldMap;
use crate::form::fields::{self, QueryParams};
use crate::form::handler::FormVariant;
use crate::form::types::{DescriptorError, FormDescriptor, FormElement};
use crate::models::Repositories;

use super::{
    MESSAGES_KEY, RECORD_LIST_TARGET, TARGET_OBJECT, UNIQUE_ID_FIELD, person_from_query,
    readonly_inputs, submit_url,
};

const FORM_ID: &str = "record-delete";
const CHECKBOX_FIELD: &str = "checkbox";
const SUCCESS_MESSAGE: &str = "Record deleted successfully.";

/// Delete a person (DELETE).
///
/// The client sets the checkbox value to the record id, so a submission
/// only confirms the record it was rendered for.
pub struct RecordDelete {
    descriptor: FormDescriptor,
    repos: Repositories,
}

impl RecordDelete {
    pub fn new(app_url: &str, repos: Repositories) -> Result<Self, DescriptorError> {
        let descriptor = FormDescriptor::builder(
            FORM_ID,
            "Delete record",
            TARGET_OBJECT,
            submit_url(app_url, FORM_ID),
        )
        .method("DELETE")
        .on_success("deleted.record", RECORD_LIST_TARGET)
        .build()?;

        Ok(Self { descriptor, repos })
    }
}

impl FormVariant for RecordDelete {
    fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    fn inputs(&self) -> Vec<FormElement> {
        let mut inputs = readonly_inputs();
        inputs.push(
            FormElement::checkbox(CHECKBOX_FIELD)
                .title("Confirm record deletion.")
                .required(),
        );
        inputs
    }

    fn default_data(&self, params: &QueryParams) -> Result<FieldMap, FormError> {
        Ok(person_from_query(&self.repos, params)?.form_fields())
    }

    fn submit(&self, payload: &FieldMap) -> Result<FieldMap, FormError> {
        fields::require_fields(payload, &[UNIQUE_ID_FIELD, CHECKBOX_FIELD])?;

        if fields::text(payload, UNIQUE_ID_FIELD) != fields::text(payload, CHECKBOX_FIELD) {
            return Err(FormError::bad_request(format!(
                "Field \"{CHECKBOX_FIELD}\" is not valid."
            )));
        }

        let person = payload
            .get(UNIQUE_ID_FIELD)
            .and_then(fields::parse_id)
            .and_then(|id| self.repos.persons.get_by_id(id))
            .ok_or_else(|| FormError::not_found("Record not found."))?;

        // The demo repositories are read-only; the removal is only echoed.
        debug!(unique_id = person.unique_id, "record deleted");

        let mut data = FieldMap::new();
        data.insert(MESSAGES_KEY.to_string(), json!([SUCCESS_MESSAGE]));
        data.insert(TARGET_OBJECT.to_string(), json!(person));
        Ok(data)
    }
}
