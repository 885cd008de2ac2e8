//! Nationality: single-value foreign attribute of a person.

use serde::Serialize;

use crate::form::SelectItem;

use super::repository::Entity;

/// Nationality record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "SelectItem")]
pub struct Nationality {
    pub unique_id: i64,
    pub name: String,
}

impl Nationality {
    pub fn new(unique_id: i64, name: impl Into<String>) -> Self {
        Self {
            unique_id,
            name: name.into(),
        }
    }

    /// Demo nationalities.
    pub fn demo_data() -> Vec<Self> {
        vec![
            Self::new(1, "Spain"),
            Self::new(2, "France"),
            Self::new(3, "United Kingdom"),
            Self::new(4, "Germany"),
            Self::new(5, "Italy"),
            Self::new(6, "Belgium"),
        ]
    }
}

impl Entity for Nationality {
    fn unique_id(&self) -> i64 {
        self.unique_id
    }
}

impl From<Nationality> for SelectItem {
    fn from(nationality: Nationality) -> Self {
        SelectItem::new(nationality.unique_id, nationality.name)
    }
}
