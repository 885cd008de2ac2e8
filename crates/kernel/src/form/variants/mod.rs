//! Record forms: create, read, update and delete a [`Person`].
//!
//! Every variant echoes the affected entity under the `Record` key and
//! describes its foreign attributes with relation links, so the client can
//! fill dependent selects without another round trip.

mod create;
mod delete;
mod read;
mod update;

pub use create::RecordCreate;
pub use delete::RecordDelete;
pub use read::RecordRead;
pub use update::RecordUpdate;

use std::sync::Arc;

use serde_json::json;

use crate::error::FormError;
use crate::models::{Hobby, Nationality, Person, Repositories};

use super::ajax::{FieldMap, RelationLink};
use super::fields::{self, QueryParams};
use super::handler::FormVariant;
use super::types::{DescriptorError, FormElement};

/// Name of the entity the record forms manage.
pub const TARGET_OBJECT: &str = "Record";

/// Event target notified after a successful submission.
pub const RECORD_LIST_TARGET: &str = "#record-list-table";

pub const UNIQUE_ID_FIELD: &str = "uniqueId";
pub const NATIONALITY_FIELD: &str = "nationality";
pub const HOBBIES_FIELD: &str = "hobbies";

const LINKS_KEY: &str = "links";
const MESSAGES_KEY: &str = "messages";

/// Build the four record forms, in list-page order.
pub fn record_forms(
    app_url: &str,
    repos: &Repositories,
) -> Result<Vec<Arc<dyn FormVariant>>, DescriptorError> {
    Ok(vec![
        Arc::new(RecordCreate::new(app_url, repos.clone())?),
        Arc::new(RecordRead::new(app_url, repos.clone())?),
        Arc::new(RecordUpdate::new(app_url, repos.clone())?),
        Arc::new(RecordDelete::new(app_url, repos.clone())?),
    ])
}

fn submit_url(app_url: &str, form_id: &str) -> String {
    format!("{}/form-manager/{form_id}", app_url.trim_end_matches('/'))
}

/// Load the person named by the `uniqueId` query parameter.
fn person_from_query(repos: &Repositories, params: &QueryParams) -> Result<Person, FormError> {
    let unique_id = fields::query_id(params, UNIQUE_ID_FIELD)?;
    repos
        .persons
        .get_by_id(unique_id)
        .ok_or_else(|| FormError::not_found(format!("Invalid param \"{UNIQUE_ID_FIELD}\".")))
}

/// Links offering every nationality and every hobby.
fn all_options_links(repos: &Repositories) -> Vec<RelationLink> {
    vec![
        RelationLink::single(NATIONALITY_FIELD, repos.nationalities.get_all()),
        RelationLink::multi(HOBBIES_FIELD, repos.hobbies.get_all()),
    ]
}

/// Links holding only the person's own nationality and hobbies.
fn selection_links(person: &Person) -> Vec<RelationLink> {
    vec![
        RelationLink::single(NATIONALITY_FIELD, [person.nationality.clone()]),
        RelationLink::multi(HOBBIES_FIELD, person.hobbies.clone()),
    ]
}

fn with_links(mut data: FieldMap, links: Vec<RelationLink>) -> FieldMap {
    data.insert(LINKS_KEY.to_string(), json!(links));
    data
}

/// Success payload: message, links of the selected values and the entity.
fn record_response(person: &Person, links: Vec<RelationLink>, message: &str) -> FieldMap {
    let mut data = FieldMap::new();
    data.insert(MESSAGES_KEY.to_string(), json!([message]));
    data.insert(TARGET_OBJECT.to_string(), json!(person));
    with_links(data, links)
}

/// Foreign records referenced by a submission.
struct Relations {
    nationality: Nationality,
    hobbies: Vec<Hobby>,
}

/// Resolve the nationality and hobbies of a submission.
///
/// Every unknown reference is reported, one message per entity kind, after
/// `preceding` (messages from earlier lookups in the same stage).
fn resolve_relations(
    repos: &Repositories,
    payload: &FieldMap,
    mut preceding: Vec<String>,
) -> Result<Relations, FormError> {
    let nationality = payload
        .get(NATIONALITY_FIELD)
        .and_then(fields::parse_id)
        .and_then(|id| repos.nationalities.get_by_id(id));
    if nationality.is_none() {
        preceding.push("Nationality not found.".to_string());
    }

    let mut hobbies = Vec::new();
    let mut unknown_hobby = false;
    for value in fields::value_list(payload.get(HOBBIES_FIELD)) {
        match fields::parse_id(value).and_then(|id| repos.hobbies.get_by_id(id)) {
            Some(hobby) => hobbies.push(hobby),
            None => unknown_hobby = true,
        }
    }
    if unknown_hobby {
        preceding.push("Hobby not found.".to_string());
    }

    match nationality {
        Some(nationality) if preceding.is_empty() => Ok(Relations {
            nationality,
            hobbies,
        }),
        _ => Err(FormError::NotFound(preceding)),
    }
}

/// Inputs shared by the create and update forms.
fn editable_inputs() -> Vec<FormElement> {
    vec![
        FormElement::hidden(UNIQUE_ID_FIELD),
        FormElement::textfield("name")
            .title("Name")
            .placeholder("Name")
            .description("Please fill the name.")
            .required(),
        FormElement::textfield("surname")
            .title("Surname")
            .placeholder("Surname")
            .description("Please fill the surname.")
            .required(),
        FormElement::select(NATIONALITY_FIELD).title("Nationality").required(),
        FormElement::multi_select(HOBBIES_FIELD).title("Hobbies"),
    ]
}

/// Inputs shared by the read and delete forms.
fn readonly_inputs() -> Vec<FormElement> {
    vec![
        FormElement::hidden(UNIQUE_ID_FIELD),
        FormElement::textfield("name").title("Name").placeholder("Name").disabled(),
        FormElement::textfield("surname")
            .title("Surname")
            .placeholder("Surname")
            .disabled(),
    ]
}

/// Text of a field as sent, for fields echoed back without a lookup.
fn owned_text(payload: &FieldMap, name: &str) -> String {
    fields::text(payload, name).trim().to_string()
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn payload(value: Value) -> FieldMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_record_forms_ids() {
        let forms = record_forms("http://localhost:3000/", &Repositories::demo()).unwrap();
        let ids: Vec<_> = forms.iter().map(|f| f.descriptor().form_id().to_string()).collect();
        assert_eq!(ids, ["record-create", "record-read", "record-update", "record-delete"]);
        assert_eq!(
            forms[2].descriptor().submit_url(),
            "http://localhost:3000/form-manager/record-update"
        );
    }

    #[test]
    fn test_resolve_relations() {
        let repos = Repositories::demo();
        let relations = resolve_relations(
            &repos,
            &payload(json!({"nationality": "3", "hobbies": [4, "5"]})),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(relations.nationality.name, "United Kingdom");
        assert_eq!(relations.hobbies.len(), 2);

        let single = resolve_relations(&repos, &payload(json!({"nationality": 1, "hobbies": 2})), Vec::new())
            .unwrap();
        assert_eq!(single.hobbies[0].name, "Music");
    }

    #[test]
    fn test_resolve_relations_collects_every_unknown_reference() {
        let repos = Repositories::demo();
        let error = resolve_relations(
            &repos,
            &payload(json!({"nationality": 99, "hobbies": [1, 42, "x"]})),
            vec!["Record not found.".to_string()],
        )
        .map(|_| ())
        .unwrap_err();

        assert_eq!(
            error.messages(),
            ["Record not found.", "Nationality not found.", "Hobby not found."]
        );
    }

    #[test]
    fn test_person_from_query() {
        let repos = Repositories::demo();
        let mut params = QueryParams::new();
        assert_eq!(
            person_from_query(&repos, &params).map(|_| ()).unwrap_err().messages(),
            ["Missing param \"uniqueId\"."]
        );

        params.insert(UNIQUE_ID_FIELD.to_string(), "7".to_string());
        let error = person_from_query(&repos, &params).map(|_| ()).unwrap_err();
        assert_eq!(error, FormError::not_found("Invalid param \"uniqueId\"."));

        params.insert(UNIQUE_ID_FIELD.to_string(), "98".to_string());
        assert_eq!(person_from_query(&repos, &params).unwrap().name, "Sandra");
    }
}
