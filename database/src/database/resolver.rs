use thiserror::Error;

use crate::model::{
    action::{Action, ActionResult},
    person::{NewPerson, Person},
};

use super::table::{
    filter::{filter, PhoneFilter},
    table::{PersonTable, TableErrors},
};

#[derive(Error, Debug, PartialEq)]
pub enum ApplyErrors {
    // CRUD - CREATE
    /// The name is kept so it can be reported back to the caller as the invalid argument
    #[error("Person already exists")]
    DuplicatePerson(String),

    #[error(transparent)]
    Table(#[from] TableErrors),
}

// Queries are a single read, mutations a single read followed by a single write. Nothing
//  needs to be rolled back because a failed check happens before the write.
pub fn apply(table: &mut PersonTable, action: Action) -> Result<ActionResult, ApplyErrors> {
    let action_result = match action {
        Action::PersonCount => ActionResult::Count(person_count(table)),
        Action::AllPersons(phone) => ActionResult::List(all_persons(table, phone)),
        Action::FindPerson(name) => ActionResult::GetSingle(find_person(table, &name)),
        Action::AddPerson(new_person) => ActionResult::Single(add_person(table, new_person)?),
        Action::EditPerson(name, phone) => {
            ActionResult::GetSingle(edit_person(table, &name, phone)?)
        }
    };

    Ok(action_result)
}

pub fn person_count(table: &PersonTable) -> usize {
    table.count()
}

#[tracing::instrument(skip(table))]
pub fn all_persons(table: &PersonTable, phone: Option<PhoneFilter>) -> Vec<Person> {
    match phone {
        Some(phone) => filter(table.all(), phone),
        None => table.all(),
    }
}

#[tracing::instrument(skip(table))]
pub fn find_person(table: &PersonTable, name: &str) -> Option<Person> {
    table.find_by_name(name)
}

#[tracing::instrument(skip(table))]
pub fn add_person(table: &mut PersonTable, new_person: NewPerson) -> Result<Person, ApplyErrors> {
    if table.find_by_name(&new_person.name).is_some() {
        return Err(ApplyErrors::DuplicatePerson(new_person.name));
    }

    let person = new_person.to_person();

    table.append(person.clone());

    Ok(person)
}

/// Returns `None` when there is nobody with that name, this is not an error
#[tracing::instrument(skip(table))]
pub fn edit_person(
    table: &mut PersonTable,
    name: &str,
    phone: String,
) -> Result<Option<Person>, ApplyErrors> {
    let index = match table.find_index_by_name(name) {
        Some(index) => index,
        None => return Ok(None),
    };

    let updated_person = table.person_rows[index].with_phone(phone);

    table.replace_at(index, updated_person.clone())?;

    Ok(Some(updated_person))
}
