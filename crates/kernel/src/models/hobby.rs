//! Hobby: multi-value foreign attribute of a person.

use serde::Serialize;

use crate::form::SelectItem;

use super::repository::Entity;

/// Hobby record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "SelectItem")]
pub struct Hobby {
    pub unique_id: i64,
    pub name: String,
}

impl Hobby {
    pub fn new(unique_id: i64, name: impl Into<String>) -> Self {
        Self {
            unique_id,
            name: name.into(),
        }
    }

    /// Demo hobbies.
    pub fn demo_data() -> Vec<Self> {
        [
            "Sports",
            "Music",
            "Literature",
            "Nature",
            "Traveling",
            "Socializing",
            "Painting",
            "Dancing",
            "Reading",
            "Writing",
        ]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Self::new(id, name))
        .collect()
    }
}

impl Entity for Hobby {
    fn unique_id(&self) -> i64 {
        self.unique_id
    }
}

impl From<Hobby> for SelectItem {
    fn from(hobby: Hobby) -> Self {
        SelectItem::new(hobby.unique_id, hobby.name)
    }
}
