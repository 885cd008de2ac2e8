//! Read-only record view.

use serde_json::json;

use crate::error::FormError;
use crate::form::ajax::FieldMap;
use crate::form::fields::QueryParams;
use crate::form::handler::FormVariant;
use crate::form::types::{DescriptorError, FormDescriptor, FormElement};
use crate::models::Repositories;

use super::{TARGET_OBJECT, UNIQUE_ID_FIELD, person_from_query, readonly_inputs, submit_url};

const FORM_ID: &str = "record-read";

/// Show a person's name and surname. Accepts no submission.
pub struct RecordRead {
    descriptor: FormDescriptor,
    repos: Repositories,
}

impl RecordRead {
    pub fn new(app_url: &str, repos: Repositories) -> Result<Self, DescriptorError> {
        let descriptor =
            FormDescriptor::builder(FORM_ID, "Read record", TARGET_OBJECT, submit_url(app_url, FORM_ID))
                .method("GET")
                .read_only()
                .build()?;

        Ok(Self { descriptor, repos })
    }
}

impl FormVariant for RecordRead {
    fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    fn inputs(&self) -> Vec<FormElement> {
        readonly_inputs()
    }

    fn default_data(&self, params: &QueryParams) -> Result<FieldMap, FormError> {
        let person = person_from_query(&self.repos, params)?;

        let mut data = FieldMap::new();
        data.insert(UNIQUE_ID_FIELD.to_string(), json!(person.unique_id));
        data.insert("name".to_string(), json!(person.name));
        data.insert("surname".to_string(), json!(person.surname));
        Ok(data)
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn params(unique_id: &str) -> QueryParams {
        QueryParams::from([(UNIQUE_ID_FIELD.to_string(), unique_id.to_string())])
    }

    #[test]
    fn test_descriptor_is_read_only() {
        let form = RecordRead::new("", Repositories::demo()).unwrap();
        assert!(form.descriptor().is_read_only());
        assert!(form.descriptor().on_success().is_none());
        assert!(form.inputs().iter().skip(1).all(|input| input.disabled));
    }

    #[test]
    fn test_default_data() {
        let form = RecordRead::new("", Repositories::demo()).unwrap();
        let data = form.default_data(&params("98")).unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data["uniqueId"], 98);
        assert_eq!(data["name"], "Sandra");
        assert_eq!(data["surname"], "Alarcón Molina");
    }

    #[test]
    fn test_default_data_errors() {
        let form = RecordRead::new("", Repositories::demo()).unwrap();

        let missing = form.default_data(&QueryParams::new()).unwrap_err();
        assert_eq!(missing, FormError::bad_request("Missing param \"uniqueId\"."));

        for bad in ["5", "abc"] {
            let unknown = form.default_data(&params(bad)).unwrap_err();
            assert_eq!(unknown, FormError::not_found("Invalid param \"uniqueId\"."));
        }
    }
}
