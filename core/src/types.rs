//! Domain type for the todo service.
//!
//! # Design
//! One struct serves as both the stored row and the request/response body.
//! Decoding goes through a JSON object, so arrays, scalars and `null` are
//! rejected. Field names match case-insensitively, omitted or `null` fields
//! keep their zero value (`{}` is a todo with an empty description, not
//! completed), unknown fields are ignored and a field with the wrong JSON type
//! is a decode error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single todo item.
///
/// `id` is the SQLite row identity. It is assigned by the store on insert and
/// any value supplied by a client is ignored or overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Map<String, Value>")]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(description: impl Into<String>, completed: bool) -> Self {
        Self {
            id: 0,
            description: description.into(),
            completed,
        }
    }

    /// Replace the id, keeping description and completion flag.
    pub fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl TryFrom<Map<String, Value>> for Todo {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut todo = Todo::default();
        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            if key.eq_ignore_ascii_case("id") {
                todo.id = serde_json::from_value(value)?;
            } else if key.eq_ignore_ascii_case("description") {
                todo.description = serde_json::from_value(value)?;
            } else if key.eq_ignore_ascii_case("completed") {
                todo.completed = serde_json::from_value(value)?;
            }
        }
        Ok(todo)
    }
}
