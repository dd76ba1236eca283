use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generates a globally unique identifier, only used when a person is created
    pub fn new() -> EntityId {
        EntityId(Uuid::new_v4().to_string())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Values
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);
