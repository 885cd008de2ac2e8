//! Repository abstraction over entity storage.
//!
//! Forms only see [`Repository`]; the demo wires in [`InMemoryRepository`],
//! and a persistent backend can be substituted without touching them.

/// An entity addressable by a numeric unique id.
pub trait Entity: Clone + Send + Sync + 'static {
    fn unique_id(&self) -> i64;
}

/// Read access to a set of entities.
pub trait Repository<T: Entity>: Send + Sync {
    /// Fetch an entity by id.
    fn get_by_id(&self, unique_id: i64) -> Option<T>;

    /// All entities, in storage order.
    fn get_all(&self) -> Vec<T>;

    /// Check whether an entity with the given id exists.
    fn exists_by_id(&self, unique_id: i64) -> bool {
        self.get_by_id(unique_id).is_some()
    }
}

/// Fixed, read-only entity list.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create a repository holding `records` in the given order.
    pub fn new(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn get_by_id(&self, unique_id: i64) -> Option<T> {
        self.records
            .iter()
            .find(|record| record.unique_id() == unique_id)
            .cloned()
    }

    fn get_all(&self) -> Vec<T> {
        self.records.clone()
    }

    fn exists_by_id(&self, unique_id: i64) -> bool {
        self.records.iter().any(|record| record.unique_id() == unique_id)
    }
}
