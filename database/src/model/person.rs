use serde::{Deserialize, Serialize};

use crate::consts::consts::EntityId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Person {
    /// Only assigned when a person is created through `add_person`, seed data has no id
    pub id: Option<EntityId>,
    pub name: String,
    pub age: Option<i32>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

/// Read-only view over a person's street / city, it is never stored
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
}

/// Arguments accepted when creating a person
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub age: i32,
}

impl NewPerson {
    pub fn new(name: &str, age: i32) -> Self {
        NewPerson {
            name: name.to_string(),
            street: None,
            city: None,
            age,
        }
    }

    pub fn set_address(mut self, street: &str, city: &str) -> Self {
        self.street = Some(street.to_string());
        self.city = Some(city.to_string());
        self
    }

    pub fn to_person(self) -> Person {
        Person {
            id: Some(EntityId::new()),
            name: self.name,
            age: Some(self.age),
            street: self.street,
            city: self.city,
            phone: None,
        }
    }
}

impl Person {
    /// Person without an id, used for seed data
    pub fn new(name: &str, age: i32) -> Self {
        Person {
            name: name.to_string(),
            age: Some(age),
            ..Default::default()
        }
    }

    pub fn address(&self) -> Address {
        Address {
            street: self.street.clone(),
            city: self.city.clone(),
        }
    }

    /// An empty phone number is treated the same as no phone number
    pub fn has_phone(&self) -> bool {
        matches!(&self.phone, Some(phone) if !phone.is_empty())
    }

    /// Shallow copy with the phone overwritten, every other field (including `id`) is kept
    pub fn with_phone(&self, phone: String) -> Person {
        Person {
            phone: Some(phone),
            ..self.clone()
        }
    }
}
