//! Person model: the record managed by the demo forms.

use serde::Serialize;
use serde_json::{Value, json};

use crate::form::FieldMap;

use super::hobby::Hobby;
use super::nationality::Nationality;
use super::repository::Entity;

/// Person record with one nationality and any number of hobbies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub unique_id: i64,
    pub name: String,
    pub surname: String,
    pub nationality: Nationality,
    pub hobbies: Vec<Hobby>,
}

impl Person {
    /// Create a person record.
    pub fn new(
        unique_id: i64,
        name: impl Into<String>,
        surname: impl Into<String>,
        nationality: Nationality,
        hobbies: Vec<Hobby>,
    ) -> Self {
        Self {
            unique_id,
            name: name.into(),
            surname: surname.into(),
            nationality,
            hobbies,
        }
    }

    /// Record as named form values, foreign attributes reduced to their ids.
    pub fn form_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("uniqueId".to_string(), json!(self.unique_id));
        fields.insert("name".to_string(), json!(self.name));
        fields.insert("surname".to_string(), json!(self.surname));
        fields.insert("nationality".to_string(), json!(self.nationality.unique_id));
        fields.insert("hobbies".to_string(), Value::from(self.hobby_ids()));
        fields
    }

    /// Ids of the person's hobbies, in order.
    pub fn hobby_ids(&self) -> Vec<i64> {
        self.hobbies.iter().map(|hobby| hobby.unique_id).collect()
    }

    /// Comma separated hobby names.
    pub fn hobby_names(&self) -> String {
        self.hobbies
            .iter()
            .map(|hobby| hobby.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Demo persons, built against the demo foreign records.
    pub fn demo_data(nationalities: &[Nationality], hobbies: &[Hobby]) -> Vec<Self> {
        let nationality = |id: i64| nationalities.iter().find(|n| n.unique_id == id).cloned();
        let pick = |ids: &[i64]| -> Vec<Hobby> {
            hobbies
                .iter()
                .filter(|hobby| ids.contains(&hobby.unique_id))
                .cloned()
                .collect()
        };

        let mut persons = Vec::new();
        if let Some(spain) = nationality(1) {
            persons.push(Self::new(23, "Pedro", "Martínez Fernández", spain, pick(&[1, 2])));
        }
        if let Some(france) = nationality(2) {
            persons.push(Self::new(98, "Sandra", "Alarcón Molina", france, pick(&[3, 9])));
        }
        persons
    }
}

impl Entity for Person {
    fn unique_id(&self) -> i64 {
        self.unique_id
    }
}
