use serde::{Deserialize, Serialize};

use crate::database::table::filter::PhoneFilter;

use super::person::{NewPerson, Person};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Action {
    PersonCount,
    /// Lists every person, optionally filtered on whether they have a phone
    AllPersons(Option<PhoneFilter>),
    FindPerson(String),
    AddPerson(NewPerson),
    /// Sets the phone of the person with the given name
    EditPerson(String, String),
}

impl Action {
    pub fn is_mutation(&self) -> bool {
        match self {
            Action::AddPerson(_) | Action::EditPerson(_, _) => true,
            Action::PersonCount | Action::AllPersons(_) | Action::FindPerson(_) => false,
        }
    }

    pub fn log_format(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

// TODO: Is there a better way to type this? Like if we know we are going to get a Count, we should be able to unwrap it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ActionResult {
    /// Used for database status messages
    SuccessStatus(String),
    Count(usize),
    Single(Person),
    GetSingle(Option<Person>),
    List(Vec<Person>),
}

impl ActionResult {
    pub fn count(self) -> usize {
        if let ActionResult::Count(c) = self {
            c
        } else {
            panic!("Action result is not of type Count")
        }
    }

    pub fn single(self) -> Person {
        if let ActionResult::Single(p) = self {
            p
        } else {
            panic!("Action result is not of type Single")
        }
    }

    pub fn get_single(self) -> Option<Person> {
        if let ActionResult::GetSingle(p) = self {
            p
        } else {
            panic!("Action result is not of type GetSingle")
        }
    }

    pub fn list(self) -> Vec<Person> {
        if let ActionResult::List(l) = self {
            l
        } else {
            panic!("Action result is not of type List")
        }
    }

    pub fn success_status(self) -> String {
        if let ActionResult::SuccessStatus(s) = self {
            s
        } else {
            panic!("Action result is not of type SuccessStatus")
        }
    }
}
