use thiserror::Error;

use crate::model::person::Person;

#[derive(Error, Debug, PartialEq)]
pub enum TableErrors {
    #[error("Cannot replace row, index {0} is out of range (rows: {1})")]
    IndexOutOfRange(usize, usize),
}

/// Ordered list of people, insertion order is preserved and there is no secondary index.
///
/// The table performs no validation, constraints (e.g. unique names) are checked by the resolver
pub struct PersonTable {
    pub person_rows: Vec<Person>,
}

impl PersonTable {
    pub fn new() -> Self {
        Self {
            person_rows: Vec::new(),
        }
    }

    /// Table containing the seed people
    pub fn with_seed() -> Self {
        Self {
            person_rows: seed_people(),
        }
    }

    pub fn count(&self) -> usize {
        self.person_rows.len()
    }

    pub fn all(&self) -> Vec<Person> {
        self.person_rows.clone()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Person> {
        self.person_rows.iter().find(|p| p.name == name).cloned()
    }

    pub fn find_index_by_name(&self, name: &str) -> Option<usize> {
        self.person_rows.iter().position(|p| p.name == name)
    }

    pub fn append(&mut self, person: Person) {
        self.person_rows.push(person);
    }

    pub fn replace_at(&mut self, index: usize, person: Person) -> Result<(), TableErrors> {
        let row_count = self.person_rows.len();

        let row = self
            .person_rows
            .get_mut(index)
            .ok_or(TableErrors::IndexOutOfRange(index, row_count))?;

        *row = person;

        Ok(())
    }
}

impl Default for PersonTable {
    fn default() -> Self {
        Self::new()
    }
}

pub fn seed_people() -> Vec<Person> {
    let mut john = Person::new("John", 20);
    john.street = Some("Street 1".to_string());
    john.city = Some("City 1".to_string());
    john.phone = Some("12345".to_string());

    vec![
        john,
        Person::new("Jane", 21),
        Person::new("Bob", 22),
        Person::new("Mary", 23),
        Person::new("Peter", 24),
    ]
}
