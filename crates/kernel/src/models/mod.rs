//! Data models and their repositories.

pub mod hobby;
pub mod nationality;
pub mod person;
pub mod repository;

use std::sync::Arc;

pub use hobby::Hobby;
pub use nationality::Nationality;
pub use person::Person;
pub use repository::{Entity, InMemoryRepository, Repository};

/// Repositories injected into the forms.
#[derive(Clone)]
pub struct Repositories {
    pub persons: Arc<dyn Repository<Person>>,
    pub nationalities: Arc<dyn Repository<Nationality>>,
    pub hobbies: Arc<dyn Repository<Hobby>>,
}

impl Repositories {
    /// In-memory repositories seeded with the demo records.
    pub fn demo() -> Self {
        let nationalities = Nationality::demo_data();
        let hobbies = Hobby::demo_data();
        let persons = Person::demo_data(&nationalities, &hobbies);

        Self {
            persons: Arc::new(InMemoryRepository::new(persons)),
            nationalities: Arc::new(InMemoryRepository::new(nationalities)),
            hobbies: Arc::new(InMemoryRepository::new(hobbies)),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("persons", &self.persons.get_all().len())
            .field("nationalities", &self.nationalities.get_all().len())
            .field("hobbies", &self.hobbies.get_all().len())
            .finish()
    }
}
