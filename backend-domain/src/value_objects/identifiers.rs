// Identifier value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned identity of a `history` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i32);

impl EventId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for EventId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
