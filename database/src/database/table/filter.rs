use serde::{Deserialize, Serialize};

use crate::model::person::Person;

/// Filters people on whether they have a phone number
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhoneFilter {
    Yes,
    No,
}

impl PhoneFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            PhoneFilter::Yes => person.has_phone(),
            PhoneFilter::No => !person.has_phone(),
        }
    }
}

#[tracing::instrument(skip(people))]
pub fn filter(people: Vec<Person>, query: PhoneFilter) -> Vec<Person> {
    people
        .into_iter()
        .filter(|person| query.matches(person))
        .collect()
}
